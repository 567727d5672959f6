//! MySQL implementation of [`RecordStore`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_json::Value;
use sqlx::mysql::{MySqlPoolOptions, MySqlRow};
use sqlx::{Column, MySqlPool, Row, TypeInfo, ValueRef};

use super::store::{RecordStore, StoreError};
use crate::config::DatabaseConfig;
use crate::domain::Record;

/// Table used when none is configured.
pub const DEFAULT_TABLE: &str = "new";

/// MySQL-backed store using a `sqlx::MySqlPool`.
///
/// The pool hands out one connection per statement and takes it back when
/// the statement completes, so callers never manage connection lifecycle.
#[derive(Debug, Clone)]
pub struct MySqlRecordStore {
    pool: MySqlPool,
    table: String,
}

impl MySqlRecordStore {
    /// Wraps an existing pool, targeting [`DEFAULT_TABLE`].
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self::with_table(pool, DEFAULT_TABLE)
    }

    /// Wraps an existing pool, targeting `table`.
    #[must_use]
    pub fn with_table(pool: MySqlPool, table: &str) -> Self {
        Self {
            pool,
            table: quote_identifier(table),
        }
    }

    /// Builds a pool that opens connections on first use.
    ///
    /// Never touches the network, so an unreachable server at startup is
    /// reported by the first [`RecordStore::ping`] rather than here.
    #[must_use]
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(config.connect_options());
        Self::with_table(pool, &config.table)
    }

    /// Returns the inner pool.
    #[must_use]
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Decodes one column by its reported MySQL type.
///
/// Integers and floats become JSON numbers, temporal types ISO-8601
/// strings, `JSON` columns nested values. Binary types are decoded as
/// lossy UTF-8; everything else as text.
fn column_value(row: &MySqlRow, index: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match type_name {
        "BOOLEAN" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            Value::from(row.try_get_unchecked::<i64, _>(index)?)
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" | "YEAR" => Value::from(row.try_get_unchecked::<u64, _>(index)?),
        "FLOAT" => Value::from(f64::from(row.try_get::<f32, _>(index)?)),
        "DOUBLE" => Value::from(row.try_get::<f64, _>(index)?),
        "DATETIME" => Value::from(
            row.try_get::<NaiveDateTime, _>(index)?
                .and_utc()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        "TIMESTAMP" => Value::from(
            row.try_get::<DateTime<Utc>, _>(index)?
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        "DATE" => Value::from(row.try_get::<NaiveDate, _>(index)?.to_string()),
        "TIME" => Value::from(row.try_get::<NaiveTime, _>(index)?.to_string()),
        "JSON" => row.try_get::<Value, _>(index)?,
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
        | "GEOMETRY" => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
            Value::from(String::from_utf8_lossy(&bytes).into_owned())
        }
        _ => Value::from(row.try_get_unchecked::<String, _>(index)?),
    };

    Ok(value)
}

fn row_to_record(row: &MySqlRow) -> Result<Record, StoreError> {
    let mut columns = BTreeMap::new();
    for column in row.columns() {
        let value = column_value(row, column.ordinal(), column.type_info().name())?;
        columns.insert(column.name().to_string(), value);
    }

    Record::from_columns(columns)
        .ok_or_else(|| StoreError::RowShape("row has no integer `id` column".to_string()))
}

#[async_trait]
impl RecordStore for MySqlRecordStore {
    async fn insert(&self, data: &str) -> Result<u64, StoreError> {
        let sql = format!("INSERT INTO {} (data) VALUES (?)", self.table);
        let result = sqlx::query(&sql).bind(data).execute(&self.pool).await?;

        Ok(result.last_insert_id())
    }

    async fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        let sql = format!("SELECT * FROM {}", self.table);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_record).collect()
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", self.table);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}
