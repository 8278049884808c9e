//! Call-recording stub primitive for mocktree
//!
//! A [`Stub`] stands in for one function. It:
//! - Records every call (arguments, then outcome) in invocation order
//! - Returns, resolves, or rejects per its configured [`Behavior`]
//! - Supports one-shot behaviors queued ahead of a persistent one
//! - Exposes its call history for assertions
//!
//! The mock factories in `mocktree-mock` create one stub per mocked path and
//! only ever forward to it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod behavior;
pub mod call;
pub mod future;
pub mod stub;

pub use behavior::{Behavior, Implementation};
pub use call::{Call, CallOutcome};
pub use future::StubFuture;
pub use stub::Stub;
