//! DuckDB-backed store
//!
//! Executes keyset page queries against a DuckDB database, file-backed or
//! in-memory. Identifiers are validated and quoted before they reach the SQL
//! text; filter values are always bound.

use std::path::Path;

use duckdb::Connection;

use super::types::{PageQuery, PageStore};
use crate::error::{Error, Result};
use crate::types::{Comparison, JsonValue, Record, SortOrder};

/// Query over a single DuckDB table
#[derive(Debug, Clone)]
pub struct TableQuery {
    table: String,
    filters: Vec<(String, Comparison, String)>,
    order: Option<(String, SortOrder)>,
    limit: Option<usize>,
}

impl TableQuery {
    /// Create a query over `table`; the name must be a plain identifier
    pub fn new(table: &str) -> Result<Self> {
        validate_identifier(table)?;
        Ok(Self {
            table: table.to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        })
    }
}

impl PageQuery for TableQuery {
    fn filter(mut self, field: &str, op: Comparison, value: &str) -> Self {
        self.filters.push((field.to_string(), op, value.to_string()));
        self
    }

    fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.order = Some((field.to_string(), order));
        self
    }

    fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Store backed by a DuckDB connection
pub struct DuckDbStore {
    conn: Connection,
}

impl DuckDbStore {
    /// Open an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Open a database file
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    /// Run DDL/DML directly; used to seed data
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }
}

impl PageStore for DuckDbStore {
    type Query = TableQuery;

    fn fetch(&self, query: &TableQuery) -> Result<Vec<Record>> {
        let (sql, binds) = build_sql(query)?;
        tracing::debug!(%sql, "executing page query");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(duckdb::params_from_iter(binds))?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let columns: &duckdb::Statement<'_> = row.as_ref();
            let mut record = Record::new();
            for idx in 0..columns.column_count() {
                let name = columns.column_name(idx)?.to_string();
                let value: duckdb::types::Value = row.get(idx)?;
                record.insert(name, value_to_json(value));
            }
            records.push(record);
        }
        Ok(records)
    }
}

/// Assemble the SELECT statement and its bind values
fn build_sql(query: &TableQuery) -> Result<(String, Vec<duckdb::types::Value>)> {
    validate_identifier(&query.table)?;
    let mut sql = format!("SELECT * FROM {}", quote_identifier(&query.table));
    let mut binds = Vec::new();

    for (i, (field, op, value)) in query.filters.iter().enumerate() {
        validate_identifier(field)?;
        let clause = if i == 0 { "WHERE" } else { "AND" };
        sql = format!(
            "{sql} {clause} {} {} ?",
            quote_identifier(field),
            op.as_sql()
        );
        binds.push(bind_value(value));
    }

    if let Some((field, order)) = &query.order {
        validate_identifier(field)?;
        sql = format!("{sql} ORDER BY {} {}", quote_identifier(field), order.as_sql());
    }

    if let Some(limit) = query.limit {
        sql = format!("{sql} LIMIT {limit}");
    }

    Ok((sql, binds))
}

/// Validate that a name is safe for SQL interpolation.
///
/// Accepts `[a-zA-Z_][a-zA-Z0-9_.]*`: plain and schema-qualified identifiers.
fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_first = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_first && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
        return Ok(());
    }
    tracing::error!(name, "rejecting unsafe SQL identifier");
    Err(Error::invalid_identifier(name))
}

/// Quote an identifier, doubling any embedded double quotes
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Type a cursor string for binding: integer, then float, then text
fn bind_value(value: &str) -> duckdb::types::Value {
    if let Ok(i) = value.parse::<i64>() {
        duckdb::types::Value::BigInt(i)
    } else if let Ok(f) = value.parse::<f64>() {
        duckdb::types::Value::Double(f)
    } else {
        duckdb::types::Value::Text(value.to_string())
    }
}

/// Convert a DuckDB value to a JSON value
fn value_to_json(value: duckdb::types::Value) -> JsonValue {
    match value {
        duckdb::types::Value::Null => JsonValue::Null,
        duckdb::types::Value::Boolean(b) => JsonValue::Bool(b),
        duckdb::types::Value::TinyInt(i) => JsonValue::Number(i.into()),
        duckdb::types::Value::SmallInt(i) => JsonValue::Number(i.into()),
        duckdb::types::Value::Int(i) => JsonValue::Number(i.into()),
        duckdb::types::Value::BigInt(i) => JsonValue::Number(i.into()),
        duckdb::types::Value::HugeInt(i) => JsonValue::String(i.to_string()),
        duckdb::types::Value::UTinyInt(i) => JsonValue::Number(i.into()),
        duckdb::types::Value::USmallInt(i) => JsonValue::Number(i.into()),
        duckdb::types::Value::UInt(i) => JsonValue::Number(i.into()),
        duckdb::types::Value::UBigInt(i) => JsonValue::Number(i.into()),
        duckdb::types::Value::Float(f) => {
            serde_json::Number::from_f64(f64::from(f)).map_or(JsonValue::Null, JsonValue::Number)
        }
        duckdb::types::Value::Double(f) => {
            serde_json::Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number)
        }
        duckdb::types::Value::Text(s) => JsonValue::String(s),
        duckdb::types::Value::Blob(b) => JsonValue::String(base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            b,
        )),
        duckdb::types::Value::Timestamp(_, i) => {
            // Microseconds since epoch, rendered as an ISO string
            let secs = i / 1_000_000;
            let nsecs = ((i % 1_000_000) * 1000) as u32;
            chrono::DateTime::from_timestamp(secs, nsecs)
                .map(|dt| JsonValue::String(dt.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()))
                .unwrap_or(JsonValue::Number(i.into()))
        }
        duckdb::types::Value::Date32(d) => {
            // Days since epoch (719163 is the number of days from 1 CE to 1970-01-01)
            chrono::NaiveDate::from_num_days_from_ce_opt(d + 719_163)
                .map(|date| JsonValue::String(date.format("%Y-%m-%d").to_string()))
                .unwrap_or(JsonValue::Number(d.into()))
        }
        duckdb::types::Value::Time64(_, t) => {
            // Microseconds since midnight
            let secs = t / 1_000_000;
            let micros = t % 1_000_000;
            JsonValue::String(format!(
                "{:02}:{:02}:{:02}.{:06}",
                secs / 3600,
                (secs % 3600) / 60,
                secs % 60,
                micros
            ))
        }
        _ => JsonValue::String(format!("{value:?}")),
    }
}
