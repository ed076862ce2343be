//! Error types for utilkit
//!
//! Helpers that can reject their input return [`UtilError`]. Helpers that
//! signal absence (like [`crate::object::get`]) return a default instead
//! and never produce one of these.

use thiserror::Error;

/// Main error type for utilkit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UtilError {
    /// An argument was outside the accepted range
    #[error("{0}")]
    InvalidArgument(String),

    /// A byte size could not be formatted or parsed
    #[error("Received invalid bytes value: {0}")]
    InvalidBytes(String),

    /// A duration expression could not be parsed
    #[error("Invalid duration expression \"{0}\"")]
    InvalidDuration(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Custom error with message
    #[error("{0}")]
    Custom(String),
}

/// Type alias for Results using UtilError
pub type Result<T> = std::result::Result<T, UtilError>;

impl UtilError {
    /// Create a custom error with a message
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        UtilError::Custom(msg.into())
    }

    /// Create an invalid-argument error with a message
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        UtilError::InvalidArgument(msg.into())
    }

    /// Check if this error was caused by malformed input
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            UtilError::InvalidArgument(_)
                | UtilError::InvalidBytes(_)
                | UtilError::InvalidDuration(_)
        )
    }
}

impl From<serde_json::Error> for UtilError {
    fn from(error: serde_json::Error) -> Self {
        UtilError::Serialization(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UtilError::InvalidBytes("incorrect".to_string());
        assert_eq!(err.to_string(), "Received invalid bytes value: incorrect");

        let err = UtilError::InvalidDuration("5 fortnights".to_string());
        assert_eq!(err.to_string(), "Invalid duration expression \"5 fortnights\"");

        let err = UtilError::custom("Custom error message");
        assert_eq!(err.to_string(), "Custom error message");
    }

    #[test]
    fn test_error_categories() {
        assert!(UtilError::invalid_argument("bad").is_validation_error());
        assert!(UtilError::InvalidBytes("x".into()).is_validation_error());
        assert!(UtilError::InvalidDuration("x".into()).is_validation_error());
        assert!(!UtilError::custom("x").is_validation_error());
    }

    #[test]
    fn test_from_serde_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: UtilError = parse_err.into();
        assert!(matches!(err, UtilError::Serialization(_)));
    }
}
