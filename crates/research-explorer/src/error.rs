//! Error types for the research explorer.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Client errors never leave the client layer: each client logs them and degrades
//! to an empty result.

use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Non-success HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// Response was not JSON
    #[error("Unexpected content type: {0}")]
    UnexpectedContentType(String),

    /// Required credential is missing
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// Upstream answered successfully but with nothing usable
    #[error("Empty response from {0}")]
    EmptyResponse(&'static str),
}

impl ClientError {
    /// Create an unexpected status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::UnexpectedStatus { status, message: message.into() }
    }

    /// Returns true if the upstream answered but not with usable data.
    #[must_use]
    pub const fn is_upstream_rejection(&self) -> bool {
        matches!(self, Self::UnexpectedStatus { .. } | Self::UnexpectedContentType(_))
    }
}

/// Errors surfaced by the explorer core to the presentation layer.
#[derive(thiserror::Error, Debug)]
pub enum ExplorerError {
    /// Year bounds are reversed
    #[error("Invalid year range: {from} is after {to}")]
    InvalidRange {
        /// Lower bound supplied by the user
        from: i32,
        /// Upper bound supplied by the user
        to: i32,
    },

    /// Input validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Writing an export failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ExplorerError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Convert to a user-friendly message.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::InvalidRange { from, to } => format!(
                "'From' year ({from}) must not be after 'To' year ({to}). No filter applied."
            ),
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            Self::Io(e) => format!("Could not write file: {e}"),
            Self::Serialization(e) => format!("Could not encode export: {e}"),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for core operations.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_rejection() {
        assert!(ClientError::status(503, "down").is_upstream_rejection());
        assert!(ClientError::UnexpectedContentType("text/html".into()).is_upstream_rejection());
        assert!(!ClientError::Timeout(Duration::from_secs(10)).is_upstream_rejection());
        assert!(!ClientError::NotConfigured("Kaggle").is_upstream_rejection());
    }

    #[test]
    fn test_invalid_range_message() {
        let err = ExplorerError::InvalidRange { from: 2030, to: 2010 };
        let msg = err.to_user_message();
        assert!(msg.contains("2030"));
        assert!(msg.contains("2010"));
    }

    #[test]
    fn test_validation_message() {
        let err = ExplorerError::validation("page", "must be a number");
        assert!(err.to_user_message().contains("page"));
        assert!(err.to_user_message().contains("must be a number"));
    }

    #[test]
    fn test_export_failure_messages() {
        let io = ExplorerError::from(std::io::Error::other("disk full"));
        assert_eq!(io.to_user_message(), "Could not write file: disk full");

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let msg = ExplorerError::from(json).to_user_message();
        assert!(msg.starts_with("Could not encode export: "));
    }
}
