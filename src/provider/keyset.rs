//! Keyset provider implementation

use crate::error::Result;
use crate::pagination::{CursorPagination, Direction, PageLinks};
use crate::store::{cursor_value, PageQuery, PageStore};
use crate::types::{Comparison, Record, SortOrder};

/// Executes one overflow-probing keyset fetch against a store.
///
/// Holds the base query, the store handle, and the request's pagination
/// state. Like the state, a provider serves exactly one request.
pub struct KeysetProvider<S: PageStore> {
    store: S,
    query: S::Query,
    pagination: CursorPagination,
}

impl<S: PageStore> KeysetProvider<S> {
    /// Create a provider from a store, a base query, and pagination state
    pub fn new(store: S, query: S::Query, pagination: CursorPagination) -> Self {
        Self {
            store,
            query,
            pagination,
        }
    }

    /// Fetch and normalize the current page.
    ///
    /// Runs the prepared query, records whether more data exists, restores
    /// client-facing (descending) order, and stores the page's boundary keys
    /// as the `prev`/`next` cursor parameters. An empty page leaves the
    /// stored parameters untouched: there is nothing to anchor a cursor on.
    pub fn fetch_page(&mut self) -> Result<Vec<Record>> {
        let query = self.prepare_query();
        let rows = self.store.fetch(&query)?;
        let rows = self.normalize(rows);

        if !rows.is_empty() {
            self.store_boundary_cursors(&rows)?;
        }
        Ok(rows)
    }

    /// Navigation links for the fetched page
    pub fn links(&self, absolute: bool) -> Result<PageLinks> {
        self.pagination.links(absolute)
    }

    /// The pagination state
    pub fn pagination(&self) -> &CursorPagination {
        &self.pagination
    }

    /// Clone the base query, probe one row past the page size, and apply the
    /// direction's bound and ordering.
    fn prepare_query(&self) -> S::Query {
        let key = self.pagination.key();
        let probe = self.pagination.limit() + 1;
        let query = self.query.clone().limit(probe);

        match self.pagination.direction() {
            Direction::First => query.order_by(key, SortOrder::Desc),
            Direction::Prev => query
                .filter(key, Comparison::Gt, self.pagination.prev())
                .order_by(key, SortOrder::Asc),
            Direction::Next => query
                .filter(key, Comparison::Lt, self.pagination.next())
                .order_by(key, SortOrder::Desc),
        }
    }

    /// Record the probe outcome, trim the probe row, and restore descending
    /// client-facing order.
    fn normalize(&mut self, mut rows: Vec<Record>) -> Vec<Record> {
        let probe = self.pagination.limit() + 1;
        let more = rows.len() == probe;
        self.pagination.set_more_data(more);

        match self.pagination.direction() {
            Direction::First | Direction::Next => {
                if more {
                    rows.pop();
                }
            }
            Direction::Prev => {
                // Fetched ascending; the reverse restores newest-first order
                // and moves the probe row to the front.
                rows.reverse();
                if more {
                    rows.remove(0);
                }
            }
        }
        rows
    }

    /// Write the first and last pagination-key values of the page back into
    /// the stored parameters as the `prev`/`next` cursors.
    fn store_boundary_cursors(&mut self, rows: &[Record]) -> Result<()> {
        let key = self.pagination.key().to_string();
        let (Some(first_row), Some(last_row)) = (rows.first(), rows.last()) else {
            return Ok(());
        };
        let first = cursor_value(first_row, &key)?;
        let last = cursor_value(last_row, &key)?;
        self.pagination.store_cursors(first, last);
        Ok(())
    }
}
