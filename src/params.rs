//! Ordered request parameters
//!
//! Navigation links re-insert cursor parameters ahead of the remaining query
//! parameters, so parameter order is part of the pagination contract rather
//! than an accident of map iteration. `RequestParams` keeps insertion order:
//! overwriting a key keeps its position, removal keeps the relative order of
//! the rest, and `insert_front` moves a key to the head of the query string.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The query parameters of one request, in query-string order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams(IndexMap<String, String>);

impl RequestParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a parameter set from key-value pairs, keeping their order
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Check whether a parameter is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set a parameter.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Set a parameter at the front of the query string.
    ///
    /// An existing key is moved to the front.
    pub fn insert_front(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.shift_insert(0, key.into(), value.into());
    }

    /// Remove a parameter, keeping the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate parameters in query-string order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
