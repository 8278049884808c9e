//! Configured stub behaviors

use mocktree_core::{StubError, StubResult, Value};
use std::fmt;
use std::sync::Arc;

/// Custom stub body: receives the call arguments, produces the outcome
pub type Implementation = Arc<dyn Fn(&[Value]) -> StubResult + Send + Sync>;

/// What a stub does when invoked
///
/// `Return` and `Resolve` produce the same outcome; they differ in intent only
/// (a plain return vs. the success value of an async member), which shows up in
/// `Debug` output and logs.
#[derive(Clone)]
pub enum Behavior {
    /// Return a fixed value
    Return(Value),
    /// Resolve with a fixed value
    Resolve(Value),
    /// Fail with a fixed error (thrown on `call`, rejected on `call_async`)
    Reject(StubError),
    /// Run a custom implementation
    Implementation(Implementation),
}

impl Behavior {
    /// Wrap a closure as an implementation behavior
    pub fn implementation<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> StubResult + Send + Sync + 'static,
    {
        Behavior::Implementation(Arc::new(f))
    }

    /// Produce the outcome for one call
    pub fn run(&self, args: &[Value]) -> StubResult {
        match self {
            Behavior::Return(value) | Behavior::Resolve(value) => Ok(value.clone()),
            Behavior::Reject(err) => Err(err.clone()),
            Behavior::Implementation(f) => f(args),
        }
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::Return(value) => f.debug_tuple("Return").field(value).finish(),
            Behavior::Resolve(value) => f.debug_tuple("Resolve").field(value).finish(),
            Behavior::Reject(err) => f.debug_tuple("Reject").field(err).finish(),
            Behavior::Implementation(_) => f.write_str("Implementation(..)"),
        }
    }
}
