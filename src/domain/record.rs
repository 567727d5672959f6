//! The single persisted entity and the rules for its `data` payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of the `new` table.
///
/// Only `id` and `data` are known columns. Any other column the table
/// carries is kept in `extra` and serialized alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Record {
    /// Datastore-assigned auto-increment key.
    pub id: i64,
    /// Free-form text payload. `None` for rows written with a NULL value
    /// by other tooling.
    pub data: Option<String>,
    /// Remaining columns, keyed by column name.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Record {
    /// Creates a record with no extra columns.
    #[must_use]
    pub fn new(id: i64, data: impl Into<String>) -> Self {
        Self {
            id,
            data: Some(data.into()),
            extra: BTreeMap::new(),
        }
    }

    /// Builds a record from a full row keyed by column name.
    ///
    /// Returns `None` if the row has no integer `id` column. A non-text
    /// `data` value is kept as its JSON text.
    #[must_use]
    pub fn from_columns(mut columns: BTreeMap<String, serde_json::Value>) -> Option<Self> {
        use serde_json::Value;

        let id = match columns.remove("id")? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))?,
            _ => return None,
        };
        let data = match columns.remove("data") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };

        Some(Self {
            id,
            data,
            extra: columns,
        })
    }
}

/// Converts a JSON `data` value into the text that gets stored.
///
/// Falsy values (`null`, `false`, `0`, `""`) are treated as absent and
/// yield `None`. Strings are stored verbatim; any other truthy value is
/// stored as its JSON text.
#[must_use]
pub fn payload_text(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
