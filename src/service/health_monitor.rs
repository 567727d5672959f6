//! Datastore reachability probing.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::DatabaseHealth;
use crate::persistence::RecordStore;

/// Runs liveness checks against the store and records the outcome in the
/// shared [`DatabaseHealth`].
///
/// Checks run once at startup, on every `GET /`, and optionally on a
/// fixed interval. A failed check never stops the process.
#[derive(Debug, Clone)]
pub struct HealthMonitor {
    store: Arc<dyn RecordStore>,
    health: Arc<DatabaseHealth>,
}

impl HealthMonitor {
    /// Creates a monitor that checks `store` and writes into `health`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, health: Arc<DatabaseHealth>) -> Self {
        Self { store, health }
    }

    /// Returns the shared reachability state.
    #[must_use]
    pub fn health(&self) -> &Arc<DatabaseHealth> {
        &self.health
    }

    /// Checks the datastore and returns whether it is reachable.
    pub async fn check(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => {
                self.health.set_reachable(true);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "database check failed");
                self.health.set_reachable(false);
                false
            }
        }
    }

    /// First check after boot. Logs the outcome at a level suited to
    /// startup and keeps going either way.
    pub async fn startup_check(&self) -> bool {
        let reachable = self.check().await;
        if reachable {
            tracing::info!("database connection test successful");
        } else {
            tracing::error!("server will continue running without database connection");
        }
        reachable
    }

    /// Spawns a task that re-checks every `interval`.
    ///
    /// The first check fires one full interval after the call, since
    /// [`HealthMonitor::startup_check`] has already run.
    #[must_use]
    pub fn spawn_periodic(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.check().await;
            }
        })
    }
}
