//! Service layer: business logic orchestration.
//!
//! [`RecordService`] gates every operation on datastore reachability and
//! issues one statement per call. [`HealthMonitor`] keeps that
//! reachability state current.

pub mod health_monitor;
pub mod record_service;

pub use health_monitor::HealthMonitor;
pub use record_service::RecordService;
