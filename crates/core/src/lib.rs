//! Core types for mocktree
//!
//! This crate defines the foundational types shared by the stub and mock crates:
//! - Value: Dynamically typed call argument / return value
//! - StubError: The failure a stub is configured to raise
//! - MockError: Configuration and conversion errors
//! - PropertyKey / Symbol: Keys used to navigate a mock tree
//! - MockPath: Root-to-node key sequence
//! - MockConfig: Factory configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod config;
pub mod error;
pub mod key;
pub mod value;

// Re-export commonly used types
pub use config::MockConfig;
pub use error::{MockError, Result, StubError, StubResult};
pub use key::{MockPath, PropertyKey, Symbol};
pub use value::Value;

/// Build a `Vec<Value>` argument list for a stub call.
///
/// ```
/// use mocktree_core::{args, Value};
///
/// let args = args![1, "two", true];
/// assert_eq!(args, vec![Value::Int(1), Value::from("two"), Value::Bool(true)]);
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}
