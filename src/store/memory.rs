//! In-memory store
//!
//! Rows live in a Vec and queries are evaluated eagerly on fetch. Backs the
//! test suites and small demo datasets.

use std::cmp::Ordering;

use super::types::{PageQuery, PageStore};
use crate::error::{Error, Result};
use crate::types::{Comparison, JsonValue, Record, SortOrder};

/// Query over the rows of a [`MemoryStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryQuery {
    filters: Vec<(String, Comparison, String)>,
    order: Option<(String, SortOrder)>,
    limit: Option<usize>,
}

impl MemoryQuery {
    /// Create an unrestricted query
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageQuery for MemoryQuery {
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

/// Vec-backed record store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Vec<Record>,
}

impl MemoryStore {
    /// Create a store over the given rows
    pub fn new(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    /// Create a store from JSON values; every value must be an object
    pub fn from_values(values: Vec<JsonValue>) -> Result<Self> {
        let mut rows = Vec::with_capacity(values.len());
        for value in values {
            match value {
                JsonValue::Object(row) => rows.push(row),
                other => {
                    return Err(Error::store(format!(
                        "memory store rows must be JSON objects, got: {other}"
                    )))
                }
            }
        }
        Ok(Self { rows })
    }

    /// Number of rows in the store
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl PageStore for MemoryStore {
    type Query = MemoryQuery;

    fn fetch(&self, query: &MemoryQuery) -> Result<Vec<Record>> {
        let mut rows: Vec<Record> = self
            .rows
            .iter()
            .filter(|row| {
                query
                    .filters
                    .iter()
                    .all(|(field, op, value)| matches_filter(row, field, *op, value))
            })
            .cloned()
            .collect();

        if let Some((field, order)) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = compare_fields(a, b, field);
                match order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        Ok(rows)
    }
}

fn matches_filter(row: &Record, field: &str, op: Comparison, value: &str) -> bool {
    let Some(actual) = row.get(field) else {
        return false;
    };
    match op {
        Comparison::Gt => compare_scalar(actual, value) == Ordering::Greater,
        Comparison::Lt => compare_scalar(actual, value) == Ordering::Less,
    }
}

/// Compare a record value against a cursor string.
///
/// Numeric when both sides are numeric, lexicographic otherwise.
fn compare_scalar(actual: &JsonValue, cursor: &str) -> Ordering {
    if let JsonValue::Number(n) = actual {
        if let (Some(a), Ok(b)) = (n.as_f64(), cursor.parse::<f64>()) {
            return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        }
    }
    scalar_text(actual).as_str().cmp(cursor)
}

/// Compare two records by a field value; missing fields sort first
fn compare_fields(a: &Record, b: &Record, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(x), Some(y)) => compare_json(x, y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

fn compare_json(x: &JsonValue, y: &JsonValue) -> Ordering {
    match (x, y) {
        (JsonValue::Number(a), JsonValue::Number(b)) => a
            .as_f64()
            .zip(b.as_f64())
            .and_then(|(a, b)| a.partial_cmp(&b))
            .unwrap_or(Ordering::Equal),
        (JsonValue::String(a), JsonValue::String(b)) => a.cmp(b),
        _ => scalar_text(x).cmp(&scalar_text(y)),
    }
}

fn scalar_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
