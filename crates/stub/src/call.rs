//! Recorded calls

use mocktree_core::{StubError, Value};

/// Outcome of one recorded call
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    /// The behavior is still running (re-entrant implementations observe this)
    Incomplete,
    /// Synchronous call returned a value
    Returned(Value),
    /// Synchronous call failed
    Threw(StubError),
    /// Async call's future resolved
    Resolved(Value),
    /// Async call's future rejected
    Rejected(StubError),
}

impl CallOutcome {
    pub(crate) fn from_result(result: &Result<Value, StubError>, is_async: bool) -> Self {
        match (result, is_async) {
            (Ok(value), false) => CallOutcome::Returned(value.clone()),
            (Err(err), false) => CallOutcome::Threw(err.clone()),
            (Ok(value), true) => CallOutcome::Resolved(value.clone()),
            (Err(err), true) => CallOutcome::Rejected(err.clone()),
        }
    }

    /// Whether the call handed something back to its caller
    ///
    /// Async calls always do: they return a future, whether it later resolves
    /// or rejects. Only a synchronous failure counts as "did not return".
    pub fn is_return(&self) -> bool {
        matches!(
            self,
            CallOutcome::Returned(_) | CallOutcome::Resolved(_) | CallOutcome::Rejected(_)
        )
    }

    /// The produced value, for successful calls
    pub fn value(&self) -> Option<&Value> {
        match self {
            CallOutcome::Returned(value) | CallOutcome::Resolved(value) => Some(value),
            _ => None,
        }
    }

    /// The raised error, for failed calls
    pub fn error(&self) -> Option<&StubError> {
        match self {
            CallOutcome::Threw(err) | CallOutcome::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

/// One invocation of a stub
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Arguments, in order
    pub args: Vec<Value>,
    /// What the call produced
    pub outcome: CallOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_result() {
        let ok: Result<Value, StubError> = Ok(Value::Int(1));
        let err: Result<Value, StubError> = Err(StubError::new("x"));

        assert_eq!(
            CallOutcome::from_result(&ok, false),
            CallOutcome::Returned(Value::Int(1))
        );
        assert_eq!(
            CallOutcome::from_result(&ok, true),
            CallOutcome::Resolved(Value::Int(1))
        );
        assert_eq!(
            CallOutcome::from_result(&err, false),
            CallOutcome::Threw(StubError::new("x"))
        );
        assert_eq!(
            CallOutcome::from_result(&err, true),
            CallOutcome::Rejected(StubError::new("x"))
        );
    }

    #[test]
    fn test_rejected_still_counts_as_return() {
        assert!(CallOutcome::Rejected(StubError::new("x")).is_return());
        assert!(CallOutcome::Resolved(Value::Null).is_return());
        assert!(!CallOutcome::Threw(StubError::new("x")).is_return());
        assert!(!CallOutcome::Incomplete.is_return());
    }

    #[test]
    fn test_value_and_error_accessors() {
        assert_eq!(
            CallOutcome::Returned(Value::Int(3)).value(),
            Some(&Value::Int(3))
        );
        assert!(CallOutcome::Rejected(StubError::new("x")).value().is_none());
        assert_eq!(
            CallOutcome::Threw(StubError::new("x")).error().map(StubError::message),
            Some("x")
        );
    }
}
