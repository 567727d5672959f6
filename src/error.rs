//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the HTTP surface. Each
//! variant maps to a status code and a `{ "message": ... }` JSON body.
//! Datastore errors are logged here and never leaked to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::persistence::StoreError;

/// JSON body shared by every confirmation and error response.
///
/// ```json
/// { "message": "Data stored successfully" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Creates a response carrying `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant              | HTTP Status               |
/// |----------------------|---------------------------|
/// | `MissingData`        | 400 Bad Request           |
/// | `MissingId`          | 400 Bad Request           |
/// | `OriginNotAllowed`   | 403 Forbidden             |
/// | `DatabaseUnavailable`| 500 Internal Server Error |
/// | `Store*`/`Fetch*`/`Delete*` | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Store request without a usable `data` field.
    #[error("Data is required")]
    MissingData,

    /// Delete request without an id.
    #[error("ID parameter is required")]
    MissingId,

    /// The last reachability check failed.
    #[error("Database connection is not available")]
    DatabaseUnavailable,

    /// Insert statement failed.
    #[error("Error storing data")]
    StoreFailed(#[source] StoreError),

    /// Select statement failed.
    #[error("Error fetching data")]
    FetchFailed(#[source] StoreError),

    /// Delete statement failed.
    #[error("Error deleting data")]
    DeleteFailed(#[source] StoreError),

    /// Cross-origin request from an origin outside the allow-list.
    #[error("Not allowed by CORS")]
    OriginNotAllowed,
}

impl GatewayError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingData | Self::MissingId => StatusCode::BAD_REQUEST,
            Self::OriginNotAllowed => StatusCode::FORBIDDEN,
            Self::DatabaseUnavailable
            | Self::StoreFailed(_)
            | Self::FetchFailed(_)
            | Self::DeleteFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match &self {
            Self::StoreFailed(e) | Self::FetchFailed(e) | Self::DeleteFailed(e) => {
                tracing::error!(error = %e, "{}", self);
            }
            Self::DatabaseUnavailable => {
                tracing::debug!("request refused: database unavailable");
            }
            _ => {}
        }

        let status = self.status_code();
        let mut response = axum::Json(MessageResponse::new(self.to_string())).into_response();
        *response.status_mut() = status;
        response
    }
}
