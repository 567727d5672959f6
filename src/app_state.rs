//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::DatabaseHealth;
use crate::persistence::RecordStore;
use crate::service::{HealthMonitor, RecordService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Record operations.
    pub record_service: Arc<RecordService>,
    /// Reachability probing for the health endpoint.
    pub health_monitor: Arc<HealthMonitor>,
}

impl AppState {
    /// Wires the services around one store and one shared reachability
    /// state.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let health = Arc::new(DatabaseHealth::new());
        let record_service = Arc::new(RecordService::new(
            Arc::clone(&store),
            Arc::clone(&health),
        ));
        let health_monitor = Arc::new(HealthMonitor::new(store, health));
        Self {
            record_service,
            health_monitor,
        }
    }
}
