//! REST API layer: route handlers, DTOs, CORS policy and router
//! composition.
//!
//! Record endpoints are mounted under `/api`; the health check lives at
//! the root.

pub mod cors;
pub mod dto;
pub mod handlers;
pub mod openapi;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use cors::SharedOriginPolicy;

/// Builds the API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the complete application: REST routes, optional Swagger UI,
/// origin rejection, CORS and request tracing.
pub fn build_app(state: AppState, origins: SharedOriginPolicy) -> Router {
    let router = build_router();

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
        .layer(cors::cors_layer(Arc::clone(&origins)))
        .layer(middleware::from_fn_with_state(
            origins,
            cors::reject_disallowed_origin,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode, header};
    use tower::ServiceExt;

    use super::cors::OriginAllowList;
    use crate::domain::Record;
    use crate::error::MessageResponse;
    use crate::persistence::{InMemoryRecordStore, RecordStore};

    const ALLOWED: &str = "http://app.example:3000";

    async fn make_app(reachable: bool) -> (Router, Arc<InMemoryRecordStore>) {
        let store = Arc::new(InMemoryRecordStore::new());
        store.set_reachable(reachable);
        let state = AppState::new(Arc::clone(&store) as Arc<dyn RecordStore>);
        state.health_monitor.startup_check().await;
        let origins: SharedOriginPolicy = Arc::new(OriginAllowList::new([ALLOWED]));
        (build_app(state, origins), store)
    }

    async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
        let Ok(response) = app.clone().oneshot(request).await;
        response
    }

    async fn body_bytes(response: Response<Body>) -> Vec<u8> {
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        bytes.to_vec()
    }

    async fn message(response: Response<Body>) -> String {
        let bytes = body_bytes(response).await;
        let Ok(body) = serde_json::from_slice::<MessageResponse>(&bytes) else {
            panic!("not a message body: {}", String::from_utf8_lossy(&bytes));
        };
        body.message
    }

    fn get(uri: &str) -> Request<Body> {
        let Ok(req) = Request::builder().uri(uri).body(Body::empty()) else {
            panic!("valid request");
        };
        req
    }

    fn store(body: &'static str) -> Request<Body> {
        store_as("application/json", body)
    }

    fn store_as(content_type: &str, body: &'static str) -> Request<Body> {
        let Ok(req) = Request::builder()
            .method("POST")
            .uri("/api/storedata")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
        else {
            panic!("valid request");
        };
        req
    }

    fn delete(uri: &str) -> Request<Body> {
        let Ok(req) = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
        else {
            panic!("valid request");
        };
        req
    }

    async fn fetch(app: &Router) -> Vec<Record> {
        let response = send(app, get("/api/getdata")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let Ok(records) = serde_json::from_slice(&body_bytes(response).await) else {
            panic!("not a record list");
        };
        records
    }

    #[tokio::test]
    async fn health_reports_running_when_reachable() {
        let (app, _) = make_app(true).await;
        let response = send(&app, get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"Backend server is running.");
    }

    #[tokio::test]
    async fn health_reports_degraded_when_unreachable() {
        let (app, _) = make_app(false).await;
        let response = send(&app, get("/")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_bytes(response).await,
            b"Backend server is running but cannot connect to the database."
        );
    }

    #[tokio::test]
    async fn health_check_restores_availability() {
        let (app, store) = make_app(false).await;
        store.set_reachable(true);
        assert_eq!(send(&app, get("/")).await.status(), StatusCode::OK);
        assert_eq!(send(&app, get("/api/getdata")).await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn store_fetch_delete_scenario() {
        let (app, _) = make_app(true).await;

        let response = send(&app, store(r#"{"data":"hello"}"#)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(message(response).await, "Data stored successfully");

        assert_eq!(fetch(&app).await, vec![Record::new(1, "hello")]);

        let response = send(&app, delete("/api/deletedata/1")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(message(response).await, "Data deleted successfully");

        assert!(fetch(&app).await.is_empty());
    }

    #[tokio::test]
    async fn store_without_data_is_rejected_and_persists_nothing() {
        let (app, store_handle) = make_app(true).await;
        for body in ["{}", r#"{"data":""}"#, r#"{"data":null}"#, "", "{not json"] {
            let response = send(&app, store(body)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body:?}");
            assert_eq!(message(response).await, "Data is required");
        }
        assert!(store_handle.is_empty().await);
        assert_eq!(store_handle.statement_count(), 0);
    }

    #[tokio::test]
    async fn non_json_content_type_counts_as_missing_data() {
        let (app, store_handle) = make_app(true).await;
        let response = send(&app, store_as("text/plain", r#"{"data":"x"}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message(response).await, "Data is required");
        assert_eq!(store_handle.statement_count(), 0);

        let response = send(&app, store_as("application/vnd.api+json", r#"{"data":"x"}"#)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store_handle.statement_count(), 1);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_still_confirms() {
        let (app, _) = make_app(true).await;
        let response = send(&app, delete("/api/deletedata/424242")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(message(response).await, "Data deleted successfully");
    }

    #[tokio::test]
    async fn delete_without_id_is_a_bad_request() {
        let (app, _) = make_app(true).await;
        for uri in ["/api/deletedata", "/api/deletedata/"] {
            let response = send(&app, delete(uri)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {uri}");
            assert_eq!(message(response).await, "ID parameter is required");
        }
    }

    #[tokio::test]
    async fn whitespace_id_is_issued_and_confirmed() {
        let (app, store_handle) = make_app(true).await;
        assert_eq!(send(&app, store(r#"{"data":"keep"}"#)).await.status(), StatusCode::OK);

        let response = send(&app, delete("/api/deletedata/%20")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(message(response).await, "Data deleted successfully");
        assert_eq!(store_handle.statement_count(), 2);
        assert_eq!(store_handle.len().await, 1);
    }

    #[tokio::test]
    async fn delete_leaves_other_records() {
        let (app, _) = make_app(true).await;
        for body in [r#"{"data":"a"}"#, r#"{"data":"b"}"#] {
            assert_eq!(send(&app, store(body)).await.status(), StatusCode::OK);
        }
        assert_eq!(send(&app, delete("/api/deletedata/1")).await.status(), StatusCode::OK);
        let remaining = fetch(&app).await;
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|r| r.id != 1));
    }

    #[tokio::test]
    async fn unreachable_database_blocks_every_record_operation() {
        let (app, store_handle) = make_app(false).await;
        let requests = [
            store(r#"{"data":"x"}"#),
            get("/api/getdata"),
            delete("/api/deletedata/1"),
        ];
        for request in requests {
            let response = send(&app, request).await;
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message(response).await, "Database connection is not available");
        }
        assert_eq!(store_handle.statement_count(), 0);
    }

    #[tokio::test]
    async fn statement_failures_return_generic_messages() {
        let (app, store_handle) = make_app(true).await;
        store_handle.set_failing(true);

        let response = send(&app, store(r#"{"data":"x"}"#)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message(response).await, "Error storing data");

        let response = send(&app, get("/api/getdata")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message(response).await, "Error fetching data");

        let response = send(&app, delete("/api/deletedata/1")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message(response).await, "Error deleting data");
    }

    fn preflight(origin: &str) -> Request<Body> {
        let Ok(req) = Request::builder()
            .method("OPTIONS")
            .uri("/api/storedata")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
        else {
            panic!("valid request");
        };
        req
    }

    #[tokio::test]
    async fn preflight_from_allowed_origin_gets_credentialed_cors_headers() {
        let (app, _) = make_app(true).await;
        let response = send(&app, preflight(ALLOWED)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok()),
            Some(ALLOWED)
        );
        assert_eq!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .and_then(|v| v.to_str().ok()),
            Some("true")
        );
        assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[tokio::test]
    async fn preflight_is_answered_for_any_path() {
        let (app, _) = make_app(true).await;
        let Ok(request) = Request::builder()
            .method("OPTIONS")
            .uri("/api/deletedata/7")
            .header(header::ORIGIN, ALLOWED)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .body(Body::empty())
        else {
            panic!("valid request");
        };
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn disallowed_origin_is_rejected_before_any_handler() {
        let (app, store_handle) = make_app(true).await;

        let response = send(&app, preflight("http://evil.example")).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(!response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

        let Ok(request) = Request::builder()
            .method("POST")
            .uri("/api/storedata")
            .header(header::ORIGIN, "http://evil.example")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"data":"x"}"#))
        else {
            panic!("valid request");
        };
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(store_handle.statement_count(), 0);
    }

    #[tokio::test]
    async fn allowed_origin_request_carries_cors_headers() {
        let (app, _) = make_app(true).await;
        let Ok(request) = Request::builder()
            .uri("/api/getdata")
            .header(header::ORIGIN, ALLOWED)
            .body(Body::empty())
        else {
            panic!("valid request");
        };
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some(ALLOWED)
        );
    }

    #[tokio::test]
    async fn request_without_origin_is_accepted() {
        let (app, _) = make_app(true).await;
        let response = send(&app, get("/api/getdata")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
