//! Error types for keyset-pager
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Configuration errors are fatal and non-recoverable: callers surface them
//! as a generic server error, never as client input problems.

use thiserror::Error;

/// The main error type for keyset-pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Ambiguous pagination cursors: prev = '{prev}', next = '{next}'")]
    AmbiguousCursors { prev: String, next: String },

    #[error("Missing request parameter: {param}")]
    MissingParam { param: String },

    #[error("Record is missing pagination key '{key}'")]
    MissingKey { key: String },

    #[error("Pagination key '{key}' is not a string or number")]
    UnsupportedKeyValue { key: String },

    // ============================================================================
    // Store Errors
    // ============================================================================
    #[error("Invalid identifier: '{name}'")]
    InvalidIdentifier { name: String },

    #[error("Store error: {message}")]
    Store { message: String },

    #[error("DuckDB error: {0}")]
    Duckdb(#[from] duckdb::Error),

    // ============================================================================
    // URL Errors
    // ============================================================================
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Serialization Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a missing request parameter error
    pub fn missing_param(param: impl Into<String>) -> Self {
        Self::MissingParam {
            param: param.into(),
        }
    }

    /// Create a missing pagination key error
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(name: impl Into<String>) -> Self {
        Self::InvalidIdentifier { name: name.into() }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Check if this error is a configuration error.
    ///
    /// Configuration errors indicate a broken pagination setup or a violated
    /// internal invariant; an HTTP layer maps them to a generic server error.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::MissingConfigField { .. }
                | Error::InvalidConfigValue { .. }
                | Error::AmbiguousCursors { .. }
                | Error::MissingParam { .. }
                | Error::MissingKey { .. }
                | Error::UnsupportedKeyValue { .. }
                | Error::InvalidIdentifier { .. }
        )
    }
}

/// Result type alias for keyset-pager
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("key");
        assert_eq!(err.to_string(), "Missing required config field: key");

        let err = Error::missing_param("next");
        assert_eq!(err.to_string(), "Missing request parameter: next");

        let err = Error::AmbiguousCursors {
            prev: "10".to_string(),
            next: "7".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Ambiguous pagination cursors: prev = '10', next = '7'"
        );
    }

    #[test]
    fn test_is_config() {
        assert!(Error::config("bad").is_config());
        assert!(Error::missing_field("key").is_config());
        assert!(Error::missing_param("prev").is_config());
        assert!(Error::missing_key("id").is_config());
        assert!(Error::invalid_identifier("id; DROP TABLE t").is_config());

        assert!(!Error::store("connection refused").is_config());
        assert!(!Error::Other("misc".to_string()).is_config());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
