//! Cross-origin policy: allow-list matching, CORS headers, and rejection of
//! disallowed origins.
//!
//! Requests without an `Origin` header pass untouched. Requests whose
//! origin is allowed get credentialed CORS headers from
//! [`tower_http::cors::CorsLayer`]. Anything else is refused by
//! [`reject_disallowed_origin`] before routing.

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header, request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::error::GatewayError;

/// Decides whether a declared origin may make cross-origin requests.
pub trait OriginPolicy: Send + Sync + std::fmt::Debug {
    /// Returns `true` if `origin` is permitted.
    fn is_allowed(&self, origin: &str) -> bool;
}

/// Shared handle to the active [`OriginPolicy`].
pub type SharedOriginPolicy = Arc<dyn OriginPolicy>;

/// Exact-match origin allow-list.
#[derive(Debug, Clone, Default)]
pub struct OriginAllowList {
    origins: HashSet<String>,
}

impl OriginAllowList {
    /// Builds an allow-list from the given origins.
    #[must_use]
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            origins: origins.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of allowed origins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Returns `true` if no origin is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

impl OriginPolicy for OriginAllowList {
    fn is_allowed(&self, origin: &str) -> bool {
        self.origins.contains(origin)
    }
}

fn header_allowed(policy: &dyn OriginPolicy, origin: &HeaderValue) -> bool {
    origin.to_str().is_ok_and(|o| policy.is_allowed(o))
}

/// Builds the CORS layer for `policy`.
///
/// Allowed origins are echoed back with credentials enabled; request
/// headers are mirrored. Preflight requests are answered here for every
/// path, so no `OPTIONS` routes exist.
#[must_use]
pub fn cors_layer(policy: SharedOriginPolicy) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &request::Parts| {
                header_allowed(policy.as_ref(), origin)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Middleware refusing requests whose `Origin` is outside the policy.
///
/// Must sit outside [`cors_layer`] so preflights from disallowed origins
/// are refused too.
pub async fn reject_disallowed_origin(
    State(policy): State<SharedOriginPolicy>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN)
        && !header_allowed(policy.as_ref(), origin)
    {
        tracing::warn!(
            origin = ?origin,
            method = %request.method(),
            path = %request.uri().path(),
            "rejected cross-origin request"
        );
        return GatewayError::OriginNotAllowed.into_response();
    }
    next.run(request).await
}
