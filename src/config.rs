//! Pagination configuration
//!
//! Parameter names, defaults, and the per-request settings parsed from the
//! request query string.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::params::RequestParams;

/// Page size used when the request does not carry one
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Query parameter carrying the requested page size
pub const PAGE_SIZE_PARAM: &str = "limit";

/// Legacy page-size parameter, stripped from every generated link
pub const LEGACY_PAGE_SIZE_PARAM: &str = "per-page";

/// Query parameter carrying the previous-page cursor
pub const PREV_PARAM: &str = "prev";

/// Query parameter carrying the next-page cursor
pub const NEXT_PARAM: &str = "next";

/// Per-request pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Number of records per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Page size that is omitted from generated links
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Unique, totally ordered record field used to order and bound queries
    pub key: String,

    /// Route the navigation links point at
    pub route: String,

    /// Client-supplied previous-page cursor (empty when absent)
    #[serde(default)]
    pub prev: String,

    /// Client-supplied next-page cursor (empty when absent)
    #[serde(default)]
    pub next: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl PageConfig {
    /// Create a config with default page size and no cursors
    pub fn new(key: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_page_size: DEFAULT_PAGE_SIZE,
            key: key.into(),
            route: route.into(),
            prev: String::new(),
            next: String::new(),
        }
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the previous-page cursor
    #[must_use]
    pub fn with_prev(mut self, prev: impl Into<String>) -> Self {
        self.prev = prev.into();
        self
    }

    /// Set the next-page cursor
    #[must_use]
    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = next.into();
        self
    }

    /// Read page size and cursors from the request query parameters.
    ///
    /// A missing, unparseable, or non-positive `limit` falls back to the
    /// default page size.
    pub fn from_params(
        key: impl Into<String>,
        route: impl Into<String>,
        params: &RequestParams,
    ) -> Self {
        let page_size = params
            .get(PAGE_SIZE_PARAM)
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            page_size,
            default_page_size: DEFAULT_PAGE_SIZE,
            key: key.into(),
            route: route.into(),
            prev: params.get(PREV_PARAM).unwrap_or_default().to_string(),
            next: params.get(NEXT_PARAM).unwrap_or_default().to_string(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.key.is_empty() {
            tracing::error!("pagination key is not configured");
            return Err(Error::missing_field("key"));
        }
        if self.route.is_empty() {
            tracing::error!("pagination route is not configured");
            return Err(Error::missing_field("route"));
        }
        if self.page_size == 0 {
            tracing::error!("page size must be at least 1");
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let config = PageConfig::new("id", "/messages");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.default_page_size, DEFAULT_PAGE_SIZE);
        assert!(config.prev.is_empty());
        assert!(config.next.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = PageConfig::new("id", "/messages")
            .with_page_size(5)
            .with_next("9");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.next, "9");
        assert!(config.prev.is_empty());
    }

    #[test]
    fn test_from_params() {
        let params = RequestParams::from_pairs([("limit", "2"), ("next", "9")]);
        let config = PageConfig::from_params("id", "/messages", &params);
        assert_eq!(config.page_size, 2);
        assert_eq!(config.next, "9");
        assert!(config.prev.is_empty());
    }

    #[test]
    fn test_from_params_falls_back_on_bad_limit() {
        for bad in ["0", "-3", "abc", ""] {
            let params = RequestParams::from_pairs([("limit", bad)]);
            let config = PageConfig::from_params("id", "/messages", &params);
            assert_eq!(config.page_size, DEFAULT_PAGE_SIZE, "limit = {bad:?}");
        }
    }

    #[test]
    fn test_validate_rejects_missing_key() {
        let config = PageConfig::new("", "/messages");
        let err = config.validate().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_validate_rejects_missing_route() {
        let config = PageConfig::new("id", "");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let config = PageConfig::new("id", "/messages").with_page_size(0);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }
}
