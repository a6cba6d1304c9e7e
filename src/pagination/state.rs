//! Per-request pagination state and link generation

use super::types::{Direction, PageLinks};
use crate::config::{
    PageConfig, LEGACY_PAGE_SIZE_PARAM, NEXT_PARAM, PAGE_SIZE_PARAM, PREV_PARAM,
};
use crate::error::{Error, Result};
use crate::params::RequestParams;
use crate::urls::UrlBuilder;

/// Pagination state for a single request.
///
/// Holds the client-supplied cursors, the direction derived from them, the
/// outcome of the overflow probe, and the request parameters navigation links
/// are built from. Constructed fresh per request and discarded afterwards;
/// continuity is carried entirely by the cursors round-tripped through the
/// client.
#[derive(Debug, Clone)]
pub struct CursorPagination {
    config: PageConfig,
    direction: Direction,
    more_data: Option<bool>,
    params: RequestParams,
    urls: UrlBuilder,
}

impl CursorPagination {
    /// Create pagination state, deriving the direction from the configured
    /// cursors.
    ///
    /// Fails on an invalid configuration or when both cursors are set.
    pub fn new(config: PageConfig, params: RequestParams, urls: UrlBuilder) -> Result<Self> {
        config.validate()?;
        let direction = Direction::from_cursors(&config.prev, &config.next)?;
        Ok(Self {
            config,
            direction,
            more_data: None,
            params,
            urls,
        })
    }

    /// The derived fetch direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The pagination key field name
    pub fn key(&self) -> &str {
        &self.config.key
    }

    /// Client-supplied previous-page cursor (empty when absent)
    pub fn prev(&self) -> &str {
        &self.config.prev
    }

    /// Client-supplied next-page cursor (empty when absent)
    pub fn next(&self) -> &str {
        &self.config.next
    }

    /// Number of records in a full page.
    ///
    /// The provider fetches one row past this to detect whether more data
    /// exists.
    pub fn limit(&self) -> usize {
        self.config.page_size
    }

    /// Overflow-probe outcome; `None` until a fetch completed
    pub fn more_data_exists(&self) -> Option<bool> {
        self.more_data
    }

    /// The stored request parameters
    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    pub(crate) fn set_more_data(&mut self, more: bool) {
        self.more_data = Some(more);
    }

    /// Record the boundary keys of the fetched page as cursor parameters.
    ///
    /// This is the only mutation of the stored parameters: an existing cursor
    /// parameter keeps its position in the query string, a fresh one is
    /// appended.
    pub(crate) fn store_cursors(&mut self, first_key: String, last_key: String) {
        self.params.insert(PREV_PARAM, first_key);
        self.params.insert(NEXT_PARAM, last_key);
    }

    /// Build a URL for the route from the current parameters.
    ///
    /// A `page_size` of `None` or 0 falls back to the configured page size.
    pub fn request_url(&self, page_size: Option<usize>, absolute: bool) -> Result<String> {
        self.page_url(&self.params, page_size, absolute)
    }

    /// Navigation links for the current page.
    ///
    /// The link pointing back toward where the client came from is always
    /// constructible from the direction just traversed; the link pointing
    /// further only exists when the probe proved more data remains.
    pub fn links(&self, absolute: bool) -> Result<PageLinks> {
        let more = self.more_data.unwrap_or(false);

        match self.direction {
            Direction::First => {
                let next = if more {
                    let mut params = self.params.clone();
                    params.remove(PREV_PARAM);
                    Some(self.page_url(&params, None, absolute)?)
                } else {
                    None
                };
                Ok(PageLinks { prev: None, next })
            }
            Direction::Next => {
                let stored_next = self.param(NEXT_PARAM)?;
                let mut params = self.params.clone();

                params.remove(NEXT_PARAM);
                let prev = Some(self.page_url(&params, None, absolute)?);

                let next = if more {
                    params.remove(PREV_PARAM);
                    params.insert_front(NEXT_PARAM, stored_next);
                    Some(self.page_url(&params, None, absolute)?)
                } else {
                    None
                };
                Ok(PageLinks { prev, next })
            }
            Direction::Prev => {
                let stored_prev = self.param(PREV_PARAM)?;
                let mut params = self.params.clone();

                params.remove(PREV_PARAM);
                let next = Some(self.page_url(&params, None, absolute)?);

                let prev = if more {
                    params.remove(NEXT_PARAM);
                    params.insert_front(PREV_PARAM, stored_prev);
                    Some(self.page_url(&params, None, absolute)?)
                } else {
                    None
                };
                Ok(PageLinks { prev, next })
            }
        }
    }

    /// Stored cursor parameter, expected to exist from processing the page
    fn param(&self, key: &str) -> Result<String> {
        match self.params.get(key) {
            Some(value) => Ok(value.to_string()),
            None => {
                tracing::error!(param = key, "missing stored cursor parameter");
                Err(Error::missing_param(key))
            }
        }
    }

    /// Build the request URL for the route with the given parameters.
    ///
    /// The page-size parameter is carried explicitly only when the effective
    /// size differs from the default; the legacy `per-page` parameter is
    /// always stripped.
    fn page_url(
        &self,
        params: &RequestParams,
        page_size: Option<usize>,
        absolute: bool,
    ) -> Result<String> {
        let mut params = Self::rewrite_params(params);

        let size = page_size
            .filter(|n| *n > 0)
            .unwrap_or(self.config.page_size);
        if size == self.config.default_page_size {
            params.remove(PAGE_SIZE_PARAM);
        } else {
            params.insert(PAGE_SIZE_PARAM, size.to_string());
        }

        if absolute {
            self.urls.absolute(&self.config.route, &params)
        } else {
            Ok(self.urls.relative(&self.config.route, &params))
        }
    }

    /// Strip legacy paging parameters, leaving the caller's copy untouched
    fn rewrite_params(params: &RequestParams) -> RequestParams {
        let mut params = params.clone();
        params.remove(LEGACY_PAGE_SIZE_PARAM);
        params
    }
}
