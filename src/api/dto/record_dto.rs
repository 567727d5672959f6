//! Record request DTOs.

use axum::http::{HeaderMap, header};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::record::payload_text;

/// Request body for `POST /api/storedata`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StoreDataRequest {
    /// Text to store. Falsy values count as missing.
    #[serde(default)]
    #[schema(value_type = String, example = "hello")]
    pub data: Option<serde_json::Value>,
}

impl StoreDataRequest {
    /// Parses a raw body leniently.
    ///
    /// An empty, malformed or non-object body yields an empty request, so
    /// it is reported as missing data rather than as a parse failure.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Parses the body only when `headers` declare a JSON content type.
    ///
    /// Any other or absent content type yields an empty request.
    #[must_use]
    pub fn from_parts(headers: &HeaderMap, body: &[u8]) -> Self {
        if is_json_content_type(headers) {
            Self::from_body(body)
        } else {
            Self::default()
        }
    }

    /// Returns the text to store, or `None` if `data` is absent or falsy.
    #[must_use]
    pub fn payload(&self) -> Option<String> {
        self.data.as_ref().and_then(payload_text)
    }
}

/// Returns `true` for `application/json` and `application/*+json`,
/// ignoring parameters such as `charset`.
#[must_use]
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
