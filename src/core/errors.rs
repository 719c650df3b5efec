//! Custom error types for translation operations

use thiserror::Error;

/// Fixed message reported for every timeout, whichever phase fired.
pub const TIMEOUT_MESSAGE: &str = "translation timed out; check the batch size or the service status";

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Remote service answered with a non-2xx status
    #[error("translation failed: {message}")]
    Failed {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// Connect, read, write or pool-acquire timeout exceeded
    #[error("{}", TIMEOUT_MESSAGE)]
    Timeout,

    /// Successful status but a body that does not match the service contract
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// What did not match
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What is wrong with the configuration
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Any transport error that is neither a connect failure nor a timeout
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl TranslationError {
    /// Shorthand for an [`TranslationError::InvalidResponse`]
    pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
        TranslationError::InvalidResponse {
            message: message.into(),
        }
    }

    /// Shorthand for a [`TranslationError::ConfigError`]
    pub(crate) fn config(message: impl Into<String>) -> Self {
        TranslationError::ConfigError {
            message: message.into(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
