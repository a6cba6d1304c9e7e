//! URL construction for navigation links
//!
//! Pagination state receives this capability at construction time; nothing in
//! the core reaches for an ambient application context to build links.

use url::form_urlencoded::Serializer;
use url::Url;

use crate::error::{Error, Result};
use crate::params::RequestParams;

/// Builds relative and absolute URLs from a route and an ordered parameter set
#[derive(Debug, Clone, Default)]
pub struct UrlBuilder {
    base: Option<Url>,
}

impl UrlBuilder {
    /// Create a builder that can only produce relative URLs
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with a base URL for absolute links
    pub fn with_base(base: &str) -> Result<Self> {
        Ok(Self {
            base: Some(Url::parse(base)?),
        })
    }

    /// Build a relative URL: `/route?key=value&...`
    ///
    /// Parameters are form-urlencoded in the order they appear in `params`.
    pub fn relative(&self, route: &str, params: &RequestParams) -> String {
        let path = if route.starts_with('/') {
            route.to_string()
        } else {
            format!("/{route}")
        };

        if params.is_empty() {
            return path;
        }

        let mut query = Serializer::new(String::new());
        for (key, value) in params.iter() {
            query.append_pair(key, value);
        }
        format!("{path}?{}", query.finish())
    }

    /// Build an absolute URL by joining the route onto the base URL
    pub fn absolute(&self, route: &str, params: &RequestParams) -> Result<String> {
        let Some(base) = &self.base else {
            tracing::error!(route, "absolute URL requested without a base URL");
            return Err(Error::config("no base URL configured for absolute links"));
        };

        let mut url = base.join(route)?;
        url.set_query(None);
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params.iter() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.to_string())
    }
}
