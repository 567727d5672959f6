//! Process-local implementation of [`RecordStore`].
//!
//! Mirrors the MySQL table semantics closely enough to exercise the HTTP
//! layer without a server: ids auto-increment from 1 and are never
//! reused, rows come back in insertion order. Reachability and statement
//! failures can be toggled to drive the degraded paths.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{RecordStore, StoreError};
use crate::domain::Record;

#[derive(Debug)]
struct Table {
    next_id: i64,
    rows: Vec<Record>,
}

/// In-memory record table.
#[derive(Debug)]
pub struct InMemoryRecordStore {
    table: RwLock<Table>,
    reachable: AtomicBool,
    failing: AtomicBool,
    statements: AtomicU64,
}

impl InMemoryRecordStore {
    /// Creates an empty, reachable store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 1,
                rows: Vec::new(),
            }),
            reachable: AtomicBool::new(true),
            failing: AtomicBool::new(false),
            statements: AtomicU64::new(0),
        }
    }

    /// Makes [`RecordStore::ping`] fail while `false`.
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::Release);
    }

    /// Makes insert, fetch and delete fail while `true`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Release);
    }

    /// Number of insert, fetch and delete statements attempted so far.
    #[must_use]
    pub fn statement_count(&self) -> u64 {
        self.statements.load(Ordering::Acquire)
    }

    /// Returns the number of stored rows.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// Returns `true` if no rows are stored.
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }

    fn begin_statement(&self) -> Result<(), StoreError> {
        self.statements.fetch_add(1, Ordering::AcqRel);
        if self.failing.load(Ordering::Acquire) {
            return Err(StoreError::Backend("statement rejected".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert(&self, data: &str) -> Result<u64, StoreError> {
        self.begin_statement()?;
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id = table.next_id.saturating_add(1);
        table.rows.push(Record::new(id, data));
        Ok(id.unsigned_abs())
    }

    async fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        self.begin_statement()?;
        Ok(self.table.read().await.rows.clone())
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        self.begin_statement()?;
        let Ok(id) = id.trim().parse::<i64>() else {
            return Ok(0);
        };
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);
        Ok((before - table.rows.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.reachable.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(StoreError::Backend("connection refused".to_string()))
        }
    }
}
