//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::{MessageResponse, StoreDataRequest};
use super::handlers::{records, system};
use crate::domain::Record;

/// Generated OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "storedata-gateway",
        description = "Store, fetch and delete rows of a single MySQL table."
    ),
    paths(
        system::health_handler,
        records::store_data,
        records::fetch_data,
        records::delete_data,
    ),
    components(schemas(Record, StoreDataRequest, MessageResponse)),
    tags(
        (name = "System", description = "Service health"),
        (name = "Records", description = "Record storage"),
    )
)]
pub struct ApiDoc;
