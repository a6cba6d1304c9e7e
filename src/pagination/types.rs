//! Pagination direction and navigation links

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which page of the result set the current request is fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// No cursor supplied: the newest page
    First,
    /// Stepping back toward newer records
    Prev,
    /// Stepping forward toward older records
    Next,
}

impl Direction {
    /// Derive the direction from the client-supplied cursors.
    ///
    /// At most one cursor may be non-empty; both empty means the first page.
    /// Both set is an ambiguous request and a configuration error.
    pub fn from_cursors(prev: &str, next: &str) -> Result<Self> {
        match (prev.is_empty(), next.is_empty()) {
            (true, true) => Ok(Self::First),
            (false, true) => Ok(Self::Prev),
            (true, false) => Ok(Self::Next),
            (false, false) => {
                tracing::error!(prev, next, "cannot resolve pagination direction");
                Err(Error::AmbiguousCursors {
                    prev: prev.to_string(),
                    next: next.to_string(),
                })
            }
        }
    }
}

/// Navigation links for the current page.
///
/// `None` marks an absent link: either the edge of the dataset or, for the
/// first page, the direction that does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    /// Link to the previous (newer) page
    pub prev: Option<String>,
    /// Link to the next (older) page
    pub next: Option<String>,
}
