//! Error types for itops

use thiserror::Error;

/// Result type alias using itops' Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for itops operations
///
/// Classification and aggregation never fail; these errors only come from the
/// boundary (loading configuration, fetching collections, serving HTTP).
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Structurally invalid input, e.g. a collection that is not a JSON array
    #[error("Validation error: {0}")]
    Validation(String),

    /// The upstream backend answered with a non-success status
    #[error("Upstream returned {status} for {module}")]
    Upstream {
        /// Module whose collection failed
        module: String,
        /// HTTP status returned
        status: u16,
    },

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an upstream error
    pub fn upstream(module: impl Into<String>, status: u16) -> Self {
        Self::Upstream {
            module: module.into(),
            status,
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error originates from the data source rather than from us
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Upstream { .. } | Self::Http(_) | Self::Io(_) | Self::Validation(_) | Self::Serialization(_)
        )
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
