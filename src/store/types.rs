//! Store abstractions
//!
//! The traits the keyset provider consumes, and record access by pagination
//! key.

use crate::error::{Error, Result};
use crate::types::{Comparison, JsonValue, Record, SortOrder};

/// A composable query over an ordered data source.
///
/// Calls compose cumulatively; `Clone` lets the provider derive one bounded,
/// ordered query per request without consuming the caller's base query.
pub trait PageQuery: Clone {
    /// Restrict results to rows where `field <op> value`
    #[must_use]
    fn filter(self, field: &str, op: Comparison, value: &str) -> Self;

    /// Order results by `field`
    #[must_use]
    fn order_by(self, field: &str, order: SortOrder) -> Self;

    /// Cap the number of returned rows
    #[must_use]
    fn limit(self, limit: usize) -> Self;
}

/// Executes queries against an ordered data store
pub trait PageStore {
    /// The query type this store understands
    type Query: PageQuery;

    /// Run the query and return records in query order
    fn fetch(&self, query: &Self::Query) -> Result<Vec<Record>>;
}

/// Pagination-key value of a record, as a cursor string.
///
/// The key must be present on every record and hold a string or number.
pub fn cursor_value(record: &Record, key: &str) -> Result<String> {
    let value = record.get(key).ok_or_else(|| {
        tracing::error!(key, "record is missing the pagination key");
        Error::missing_key(key)
    })?;

    match value {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        _ => {
            tracing::error!(key, "pagination key must be a string or number");
            Err(Error::UnsupportedKeyValue {
                key: key.to_string(),
            })
        }
    }
}
