//! Domain layer: the record model and datastore reachability state.

pub mod health;
pub mod record;

pub use health::DatabaseHealth;
pub use record::Record;
