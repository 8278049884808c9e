//! Error types for mocktree
//!
//! Two families live here:
//! - [`StubError`]: the failure a stub has been *configured* to raise. It is
//!   test data, not a malfunction, and passes through the mock tree untouched.
//! - [`MockError`]: genuine failures of the library surface (invalid
//!   configuration, values that cannot be converted).
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::value::Value;
use thiserror::Error;

/// Result type alias for mocktree operations
pub type Result<T> = std::result::Result<T, MockError>;

/// Outcome of invoking a stub
pub type StubResult = std::result::Result<Value, StubError>;

/// Failure raised by a stub configured to throw or reject
///
/// `Display` renders exactly the message, so assertions can compare
/// `err.to_string()` against the text the test configured.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct StubError {
    message: String,
    payload: Option<Value>,
}

impl StubError {
    /// Create an error carrying only a message
    pub fn new(message: impl Into<String>) -> Self {
        StubError {
            message: message.into(),
            payload: None,
        }
    }

    /// Attach a structured payload (builder pattern)
    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// The configured message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The structured payload, if one was attached
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }
}

impl From<&str> for StubError {
    fn from(message: &str) -> Self {
        StubError::new(message)
    }
}

impl From<String> for StubError {
    fn from(message: String) -> Self {
        StubError::new(message)
    }
}

/// Error types for the mocktree library surface
#[derive(Debug, Error)]
pub enum MockError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Value could not be converted to or from a domain type
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for MockError {
    fn from(e: serde_json::Error) -> Self {
        MockError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_error_display_is_message() {
        let err = StubError::new("Async Error");
        assert_eq!(err.to_string(), "Async Error");
        assert_eq!(err.message(), "Async Error");
        assert!(err.payload().is_none());
    }

    #[test]
    fn test_stub_error_payload() {
        let err = StubError::from("User not found").with_payload(404);
        assert_eq!(err.payload(), Some(&Value::Int(404)));
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn test_stub_error_equality() {
        assert_eq!(StubError::from("x"), StubError::from("x".to_string()));
        assert_ne!(StubError::from("x"), StubError::from("x").with_payload(true));
    }

    #[test]
    fn test_mock_error_display_invalid_config() {
        let err = MockError::InvalidConfig("path separator is empty".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Invalid configuration"));
        assert!(msg.contains("path separator is empty"));
    }

    #[test]
    fn test_mock_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: MockError = json_err.into();
        assert!(matches!(err, MockError::Serialization(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_error() -> Result<i32> {
            Err(MockError::InvalidConfig("test".to_string()))
        }

        assert!(returns_error().is_err());
    }
}
