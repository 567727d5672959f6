//! Record handlers: store, fetch, delete.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use crate::api::dto::{MessageResponse, StoreDataRequest};
use crate::app_state::AppState;
use crate::domain::Record;
use crate::error::GatewayError;

/// Confirmation message for a successful store.
pub const DATA_STORED: &str = "Data stored successfully";

/// Confirmation message for a delete, whether or not a row matched.
pub const DATA_DELETED: &str = "Data deleted successfully";

/// `POST /api/storedata` — Insert one record.
///
/// # Errors
///
/// Returns [`GatewayError`] when the database is unavailable, `data` is
/// missing, or the insert fails.
#[utoipa::path(
    post,
    path = "/api/storedata",
    tag = "Records",
    summary = "Store a record",
    description = "Inserts the `data` field as a new row. The body is read as JSON only when the content type is `application/json` or `application/*+json`. A missing, empty or malformed body, or any other content type, is reported as missing data.",
    request_body = StoreDataRequest,
    responses(
        (status = 200, description = "Record stored", body = MessageResponse),
        (status = 400, description = "Missing data", body = MessageResponse),
        (status = 500, description = "Database unavailable or insert failed", body = MessageResponse),
    )
)]
pub async fn store_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, GatewayError> {
    let payload = StoreDataRequest::from_parts(&headers, &body).payload();
    state.record_service.store(payload).await?;
    Ok(Json(MessageResponse::new(DATA_STORED)))
}

/// `GET /api/getdata` — List every record.
///
/// # Errors
///
/// Returns [`GatewayError`] when the database is unavailable or the
/// select fails.
#[utoipa::path(
    get,
    path = "/api/getdata",
    tag = "Records",
    summary = "Fetch all records",
    description = "Returns every row in the order the database produces them. No pagination.",
    responses(
        (status = 200, description = "All records", body = Vec<Record>),
        (status = 500, description = "Database unavailable or select failed", body = MessageResponse),
    )
)]
pub async fn fetch_data(State(state): State<AppState>) -> Result<Json<Vec<Record>>, GatewayError> {
    let records = state.record_service.fetch_all().await?;
    Ok(Json(records))
}

/// `DELETE /api/deletedata/{id}` — Delete one record by id.
///
/// # Errors
///
/// Returns [`GatewayError`] when the database is unavailable, the id is
/// empty, or the delete fails.
#[utoipa::path(
    delete,
    path = "/api/deletedata/{id}",
    tag = "Records",
    summary = "Delete a record",
    description = "Deletes the row with the given id. Reports success even when no row matched.",
    params(
        ("id" = String, Path, description = "Record id"),
    ),
    responses(
        (status = 200, description = "Delete issued", body = MessageResponse),
        (status = 400, description = "Missing id", body = MessageResponse),
        (status = 500, description = "Database unavailable or delete failed", body = MessageResponse),
    )
)]
pub async fn delete_data(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    state.record_service.delete(&id).await?;
    Ok(Json(MessageResponse::new(DATA_DELETED)))
}

/// `DELETE /api/deletedata` — Delete without an id; always a client error
/// once the database is reachable.
async fn delete_without_id(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, GatewayError> {
    state.record_service.delete("").await?;
    Ok(Json(MessageResponse::new(DATA_DELETED)))
}

/// Record routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/storedata", post(store_data))
        .route("/getdata", get(fetch_data))
        .route("/deletedata", delete(delete_without_id))
        .route("/deletedata/", delete(delete_without_id))
        .route("/deletedata/{id}", delete(delete_data))
}
