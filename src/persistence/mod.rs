//! Persistence layer: the `new` record table.
//!
//! Provides the [`RecordStore`] trait for single-statement access to the
//! table. The production implementation uses `sqlx::MySqlPool`; an
//! in-memory implementation backs tests and local runs.

pub mod memory;
pub mod mysql;
pub mod store;

pub use memory::InMemoryRecordStore;
pub use mysql::MySqlRecordStore;
pub use store::{RecordStore, StoreError};
