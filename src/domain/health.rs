//! Shared datastore reachability state.
//!
//! [`DatabaseHealth`] starts out unreachable and is updated by every
//! connectivity check. Request handlers read it to short-circuit with a
//! service-unavailable response instead of attempting a statement.

use std::sync::atomic::{AtomicBool, Ordering};

/// Latest known reachability of the datastore.
#[derive(Debug, Default)]
pub struct DatabaseHealth {
    reachable: AtomicBool,
}

impl DatabaseHealth {
    /// Creates the state in the unreachable position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the last check succeeded.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.reachable.load(Ordering::Acquire)
    }

    /// Records a check outcome and returns the previous value.
    pub fn set_reachable(&self, reachable: bool) -> bool {
        let previous = self.reachable.swap(reachable, Ordering::AcqRel);
        if previous != reachable {
            if reachable {
                tracing::info!("database became reachable");
            } else {
                tracing::warn!("database became unreachable");
            }
        }
        previous
    }
}
