//! Record service: availability gate, validation and one statement per call.

use std::sync::Arc;

use crate::domain::{DatabaseHealth, Record};
use crate::error::GatewayError;
use crate::persistence::RecordStore;

/// Orchestration layer for the store, fetch and delete operations.
///
/// Every method follows the same pattern: check reachability → validate
/// input → issue exactly one statement → map the outcome.
#[derive(Debug, Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
    health: Arc<DatabaseHealth>,
}

impl RecordService {
    /// Creates a new `RecordService`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, health: Arc<DatabaseHealth>) -> Self {
        Self { store, health }
    }

    /// Returns the shared reachability state.
    #[must_use]
    pub fn health(&self) -> &Arc<DatabaseHealth> {
        &self.health
    }

    fn ensure_available(&self) -> Result<(), GatewayError> {
        if self.health.is_reachable() {
            Ok(())
        } else {
            Err(GatewayError::DatabaseUnavailable)
        }
    }

    /// Inserts `data` and returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DatabaseUnavailable`] when the datastore is
    /// unreachable, [`GatewayError::MissingData`] when `data` is `None`,
    /// and [`GatewayError::StoreFailed`] when the insert fails.
    pub async fn store(&self, data: Option<String>) -> Result<u64, GatewayError> {
        self.ensure_available()?;
        let data = data.ok_or(GatewayError::MissingData)?;

        let id = self
            .store
            .insert(&data)
            .await
            .map_err(GatewayError::StoreFailed)?;

        tracing::info!(id, "data stored");
        Ok(id)
    }

    /// Returns every stored record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DatabaseUnavailable`] when the datastore is
    /// unreachable and [`GatewayError::FetchFailed`] when the select fails.
    pub async fn fetch_all(&self) -> Result<Vec<Record>, GatewayError> {
        self.ensure_available()?;
        self.store
            .fetch_all()
            .await
            .map_err(GatewayError::FetchFailed)
    }

    /// Deletes the record with the given id.
    ///
    /// Succeeds whether or not a row matched; the affected count is only
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DatabaseUnavailable`] when the datastore is
    /// unreachable, [`GatewayError::MissingId`] when `id` is empty, and
    /// [`GatewayError::DeleteFailed`] when the delete fails.
    pub async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        self.ensure_available()?;
        if id.is_empty() {
            return Err(GatewayError::MissingId);
        }

        let removed = self
            .store
            .delete(id)
            .await
            .map_err(GatewayError::DeleteFailed)?;

        tracing::info!(id, rows_affected = removed, "data deleted");
        Ok(())
    }
}
