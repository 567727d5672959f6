//! The [`RecordStore`] abstraction over the `new` table.

use async_trait::async_trait;

use crate::domain::Record;

/// Failure reported by a [`RecordStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Error returned by the `sqlx` driver.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A returned row could not be turned into a [`Record`].
    #[error("unexpected row shape: {0}")]
    RowShape(String),

    /// Failure raised by a non-SQL backend.
    #[error("store error: {0}")]
    Backend(String),
}

/// Single-statement access to the record table.
///
/// Every method issues exactly one statement and never retries.
#[async_trait]
pub trait RecordStore: Send + Sync + std::fmt::Debug {
    /// Inserts a row and returns the id the datastore assigned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the statement fails.
    async fn insert(&self, data: &str) -> Result<u64, StoreError>;

    /// Returns every row, with every column, in datastore order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the statement fails.
    async fn fetch_all(&self) -> Result<Vec<Record>, StoreError>;

    /// Deletes the row whose id equals `id` and returns the number of rows
    /// removed. The raw path value is bound unchanged, so the datastore's
    /// own comparison rules decide what matches.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the statement fails.
    async fn delete(&self, id: &str) -> Result<u64, StoreError>;

    /// Borrows one connection, runs a trivial liveness statement and
    /// releases it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if no connection can be obtained or the
    /// statement fails.
    async fn ping(&self) -> Result<(), StoreError>;
}
