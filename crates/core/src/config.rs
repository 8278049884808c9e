//! Mock factory configuration.
//!
//! This module provides configuration shared by every node of one mock tree.

use crate::error::{MockError, Result};
use crate::value::Value;

/// Mock factory configuration parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MockConfig {
    /// Value an unconfigured stub returns (default: `Value::Null`).
    pub default_return: Value,

    /// Separator for dotted paths (default: `"."`).
    ///
    /// Used when navigating with `at("a.b.c")` and when naming stubs.
    pub path_separator: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        MockConfig {
            default_return: Value::Null,
            path_separator: ".".to_string(),
        }
    }
}

impl MockConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unconfigured return value (builder pattern).
    pub fn with_default_return(mut self, value: impl Into<Value>) -> Self {
        self.default_return = value.into();
        self
    }

    /// Set the path separator (builder pattern).
    pub fn with_path_separator(mut self, separator: impl Into<String>) -> Self {
        self.path_separator = separator.into();
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.path_separator.trim().is_empty() {
            return Err(MockError::InvalidConfig(
                "path separator must contain a non-whitespace character".to_string(),
            ));
        }
        Ok(())
    }
}
