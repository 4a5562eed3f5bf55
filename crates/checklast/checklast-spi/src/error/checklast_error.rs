//! Check Last error types.

use thiserror::Error;

/// Errors raised by the tracker and its collaborators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckLastError {
    /// Rejected configuration value; prior configuration is kept
    #[error("Invalid configuration '{name}': {reason}")]
    InvalidConfiguration { name: String, reason: String },

    /// Series has no usable data
    #[error("Invalid series: {0}")]
    SeriesInvalid(String),

    /// Forecast checker could not build or apply a model
    #[error("Modeling failure: {0}")]
    ModelingFailure(String),

    /// Export sink unavailable or write error
    #[error("Export failure: {0}")]
    ExportFailure(String),

    /// Malformed text input (periods, specifications, tables)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl CheckLastError {
    /// Shorthand for [`CheckLastError::InvalidConfiguration`].
    pub fn invalid_config(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for Check Last operations.
pub type Result<T> = std::result::Result<T, CheckLastError>;
