//! System endpoints: health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::app_state::AppState;

/// Body returned when the datastore answers.
pub const SERVER_RUNNING: &str = "Backend server is running.";

/// Body returned when the datastore does not answer.
pub const SERVER_DEGRADED: &str = "Backend server is running but cannot connect to the database.";

/// `GET /` — Service health status.
///
/// Re-checks the datastore on every call, so the answer also refreshes
/// the reachability state the record endpoints consult.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Health check",
    description = "Checks the database and reports whether the service can reach it.",
    responses(
        (status = 200, description = "Database reachable", body = String, content_type = "text/plain"),
        (status = 500, description = "Database unreachable", body = String, content_type = "text/plain"),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.health_monitor.check().await {
        (StatusCode::OK, SERVER_RUNNING)
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, SERVER_DEGRADED)
    }
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(health_handler))
}
