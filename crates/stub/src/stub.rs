//! The stub primitive
//!
//! ## Behavior resolution
//!
//! Each call consumes the oldest queued one-shot behavior if there is one,
//! otherwise uses the persistent behavior, otherwise returns the stub's
//! default value (`Value::Null` unless the factory configured another).
//!
//! ## Recording
//!
//! A call is appended to the history *before* its behavior runs, with
//! `CallOutcome::Incomplete`, and its outcome is filled in afterward. The lock
//! is not held while the behavior runs, so an implementation may call back
//! into the same stub.

use crate::behavior::Behavior;
use crate::call::{Call, CallOutcome};
use crate::future::StubFuture;
use mocktree_core::{StubError, StubResult, Value};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct StubState {
    calls: Vec<Call>,
    persistent: Option<Behavior>,
    once: VecDeque<Behavior>,
    /// Bumped by `clear`/`reset`; outcomes of calls from an older epoch are dropped
    epoch: u64,
}

/// Renders a stub name the first time it is needed
type NameRenderer = Box<dyn Fn() -> String + Send + Sync>;

enum StubName {
    Anonymous,
    Fixed(String),
    Deferred {
        render: NameRenderer,
        rendered: OnceCell<String>,
    },
}

/// Call-recording, behavior-configurable substitute for a function
pub struct Stub {
    name: StubName,
    default_return: Value,
    state: Mutex<StubState>,
}

impl Stub {
    /// Create an anonymous stub returning `Value::Null` by default
    pub fn new() -> Self {
        Stub {
            name: StubName::Anonymous,
            default_return: Value::Null,
            state: Mutex::new(StubState::default()),
        }
    }

    /// Create a stub with a name used in logs and `Debug` output
    pub fn named(name: impl Into<String>) -> Self {
        Stub {
            name: StubName::Fixed(name.into()),
            ..Stub::new()
        }
    }

    /// Create a stub whose name is produced by `render` on first use
    ///
    /// For names that are costly to build and rarely read, such as the full
    /// path of a node deep in a mock tree.
    pub fn named_with<F>(render: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Stub {
            name: StubName::Deferred {
                render: Box::new(render),
                rendered: OnceCell::new(),
            },
            ..Stub::new()
        }
    }

    /// Set the value returned when no behavior is configured (builder pattern)
    pub fn with_default_return(mut self, value: impl Into<Value>) -> Self {
        self.default_return = value.into();
        self
    }

    /// The stub's name, if it has one
    pub fn name(&self) -> Option<&str> {
        match &self.name {
            StubName::Anonymous => None,
            StubName::Fixed(name) => Some(name.as_str()),
            StubName::Deferred { render, rendered } => {
                Some(rendered.get_or_init(|| render()).as_str())
            }
        }
    }

    /// The stub itself, for assertions written as `member.spy().times_called()`
    pub fn spy(&self) -> &Self {
        self
    }

    fn label(&self) -> &str {
        self.name().unwrap_or("<anonymous>")
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Install `behavior` persistently, or queue it for a single call
    pub fn configure(&self, behavior: Behavior, once: bool) -> &Self {
        debug!(target: "mocktree::stub", stub = self.label(), ?behavior, once, "Behavior configured");
        let mut state = self.state.lock();
        if once {
            state.once.push_back(behavior);
        } else {
            state.persistent = Some(behavior);
        }
        self
    }

    /// Return `value` from every call
    pub fn return_value(&self, value: impl Into<Value>) -> &Self {
        self.configure(Behavior::Return(value.into()), false)
    }

    /// Return `value` from the next unserved call only
    pub fn return_value_once(&self, value: impl Into<Value>) -> &Self {
        self.configure(Behavior::Return(value.into()), true)
    }

    /// Resolve every call with `value`
    pub fn resolved_value(&self, value: impl Into<Value>) -> &Self {
        self.configure(Behavior::Resolve(value.into()), false)
    }

    /// Resolve the next unserved call with `value`
    pub fn resolved_value_once(&self, value: impl Into<Value>) -> &Self {
        self.configure(Behavior::Resolve(value.into()), true)
    }

    /// Fail every call with `err`
    pub fn rejected_value(&self, err: impl Into<StubError>) -> &Self {
        self.configure(Behavior::Reject(err.into()), false)
    }

    /// Fail the next unserved call with `err`
    pub fn rejected_value_once(&self, err: impl Into<StubError>) -> &Self {
        self.configure(Behavior::Reject(err.into()), true)
    }

    /// Run `f` for every call
    pub fn implementation<F>(&self, f: F) -> &Self
    where
        F: Fn(&[Value]) -> StubResult + Send + Sync + 'static,
    {
        self.configure(Behavior::implementation(f), false)
    }

    /// Run `f` for the next unserved call
    pub fn implementation_once<F>(&self, f: F) -> &Self
    where
        F: Fn(&[Value]) -> StubResult + Send + Sync + 'static,
    {
        self.configure(Behavior::implementation(f), true)
    }

    /// Forget recorded calls, keep behaviors
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.calls.clear();
        state.epoch += 1;
    }

    /// Forget recorded calls and every configured behavior
    pub fn reset(&self) {
        debug!(target: "mocktree::stub", stub = self.label(), "Stub reset");
        let mut state = self.state.lock();
        state.calls.clear();
        state.persistent = None;
        state.once.clear();
        state.epoch += 1;
    }

    // ========================================================================
    // Invocation
    // ========================================================================

    /// Invoke synchronously; a configured failure is returned as `Err` (thrown)
    ///
    /// A value configured with `resolved_value` comes back as-is: there is no
    /// future on the synchronous path. Use [`Stub::call_async`] to await it.
    pub fn call(&self, args: Vec<Value>) -> StubResult {
        self.invoke(args, false)
    }

    /// Invoke asynchronously; a configured failure rejects the returned future
    pub fn call_async(&self, args: Vec<Value>) -> StubFuture {
        StubFuture::settled(self.invoke(args, true))
    }

    fn invoke(&self, args: Vec<Value>, is_async: bool) -> StubResult {
        let (index, epoch, behavior) = {
            let mut state = self.state.lock();
            let behavior = match state.once.pop_front() {
                Some(behavior) => Some(behavior),
                None => state.persistent.clone(),
            };
            state.calls.push(Call {
                args: args.clone(),
                outcome: CallOutcome::Incomplete,
            });
            (state.calls.len() - 1, state.epoch, behavior)
        };

        let result = match behavior {
            Some(behavior) => behavior.run(&args),
            None => Ok(self.default_return.clone()),
        };

        trace!(
            target: "mocktree::stub",
            stub = self.label(),
            args = args.len(),
            is_async,
            ok = result.is_ok(),
            "Call recorded"
        );

        let mut state = self.state.lock();
        if state.epoch == epoch {
            if let Some(call) = state.calls.get_mut(index) {
                call.outcome = CallOutcome::from_result(&result, is_async);
            }
        }
        result
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Snapshot of the call history, oldest first
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    /// Number of recorded calls
    pub fn times_called(&self) -> usize {
        self.state.lock().calls.len()
    }

    /// Whether the stub was called at least once
    pub fn was_called(&self) -> bool {
        self.times_called() > 0
    }

    /// The call at `index` (0-based)
    pub fn nth_call(&self, index: usize) -> Option<Call> {
        self.state.lock().calls.get(index).cloned()
    }

    /// The most recent call
    pub fn last_call(&self) -> Option<Call> {
        self.state.lock().calls.last().cloned()
    }

    /// Whether any call received exactly `args`
    pub fn was_called_with(&self, args: &[Value]) -> bool {
        self.state
            .lock()
            .calls
            .iter()
            .any(|call| call.args.as_slice() == args)
    }

    /// Number of calls that handed something back (see [`CallOutcome::is_return`])
    pub fn returned_times(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| call.outcome.is_return())
            .count()
    }

    /// Whether any call produced `value`
    pub fn returned_with(&self, value: &Value) -> bool {
        self.state
            .lock()
            .calls
            .iter()
            .any(|call| call.outcome.value() == Some(value))
    }
}

impl Default for Stub {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Stub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Stub")
            .field("name", &self.name())
            .field("calls", &state.calls.len())
            .field("persistent", &state.persistent)
            .field("queued", &state.once.len())
            .finish()
    }
}
