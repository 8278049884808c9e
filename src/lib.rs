//! mocktree - Lazy, arbitrarily deep call-recording mocks
//!
//! Ask for a mock of a collaborator and use whatever members the code under
//! test needs. Members materialize on first access: a shallow mock hands out
//! plain stubs, a deep mock hands out nodes that are callable and navigable at
//! the same time, to any depth.
//!
//! # Quick Start
//!
//! ```
//! use mocktree::{args, deep_mock, Value};
//!
//! trait ComplexService {}
//!
//! let service = deep_mock::<dyn ComplexService>();
//! service
//!     .at("auth.service.sign_up")
//!     .return_value(Value::object([("id", "1"), ("name", "A")]));
//!
//! let user = service.at("auth.service.sign_up").call(args!["input"]).unwrap();
//! assert_eq!(user.get("id"), Some(&Value::from("1")));
//! assert!(service.at("auth.service.sign_up").spy().was_called_with(&args!["input"]));
//! ```
//!
//! # Architecture
//!
//! - `mocktree-core`: values, keys, errors, configuration
//! - `mocktree-stub`: the call-recording [`Stub`]
//! - `mocktree-mock`: identity cache and the shallow / deep factories

pub use mocktree_core::{
    args, MockConfig, MockError, MockPath, PropertyKey, Result, StubError, StubResult, Symbol,
    Value,
};
pub use mocktree_mock::{
    deep_mock, deep_mock_with_config, shallow_mock, shallow_mock_with_config, DeepMock,
    IdentityCache, MockNode, ShallowMock,
};
pub use mocktree_stub::{Behavior, Call, CallOutcome, Implementation, Stub, StubFuture};
