//! Lazy mock trees for mocktree
//!
//! Two factories build stand-ins for collaborators whose shape is never
//! declared up front:
//!
//! - [`shallow_mock`]: every accessed member is an independent [`Stub`]
//! - [`deep_mock`]: every accessed member is a [`MockNode`], which is callable
//!   like a stub *and* navigable like a further mock, to any depth
//!
//! Members materialize on first access and are memoized per level, so the
//! same path always yields the same `Arc` for the lifetime of the tree.
//!
//! # Example
//!
//! ```
//! use mocktree_core::{args, Value};
//! use mocktree_mock::deep_mock;
//!
//! struct AuthApi;
//!
//! let api = deep_mock::<AuthApi>();
//! api.at("auth.service.sign_up").return_value("ok");
//!
//! let result = api.field("auth").field("service").field("sign_up").call(args!["user"]);
//! assert_eq!(result, Ok(Value::from("ok")));
//! assert_eq!(api.at("auth.service.sign_up").spy().times_called(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod deep;
pub mod node;
pub mod shallow;

pub use cache::IdentityCache;
pub use deep::{deep_mock, deep_mock_with_config, DeepMock};
pub use node::MockNode;
pub use shallow::{shallow_mock, shallow_mock_with_config, ShallowMock};

pub use mocktree_stub::Stub;
