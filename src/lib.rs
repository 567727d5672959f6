//! # storedata-gateway
//!
//! REST gateway exposing store, fetch and delete operations over a single
//! MySQL table.
//!
//! Every request is gated on the last known reachability of the database,
//! validated for its one required field, and turned into exactly one
//! parameterized statement. Cross-origin access is limited to a
//! configurable allow-list.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── Origin guard + CORS (api/cors)
//!     ├── REST Handlers (api/)
//!     │
//!     ├── RecordService / HealthMonitor (service/)
//!     ├── DatabaseHealth (domain/)
//!     │
//!     └── RecordStore (persistence/)
//!           ├── MySQL (sqlx pool)
//!           └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
