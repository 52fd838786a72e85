//! Error types for the knowledge chat Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Message returned to callers for every non-validation failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors that can occur while answering a chat query.
#[derive(Error, Debug)]
pub enum Error {
    /// AWS SDK error
    #[error("AWS error: {0}")]
    Aws(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            _ => 500,
        }
    }

    /// Message that is safe to hand back to the caller.
    ///
    /// Validation messages are passed through verbatim; everything else is
    /// collapsed into the generic internal error so no upstream detail leaks.
    pub fn client_message(&self) -> &str {
        match self {
            Error::Validation(message) => message,
            _ => INTERNAL_ERROR_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = Error::Validation("Query missing".to_string());
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.client_message(), "Query missing");
    }

    #[test]
    fn test_upstream_detail_is_hidden() {
        let err = Error::Aws("AccessDeniedException: not authorized".to_string());
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.client_message(), "Internal server error");
        assert!(err.to_string().contains("AccessDeniedException"));
    }

    #[test]
    fn test_json_error_is_internal() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = Error::from(parse_err);
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.client_message(), INTERNAL_ERROR_MESSAGE);
    }
}
