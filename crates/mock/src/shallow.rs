//! Shallow mock factory
//!
//! [`shallow_mock`] returns a [`ShallowMock`] whose every member is a plain
//! [`Stub`], created on first access and memoized. There is no recursion: a
//! shallow member is only ever callable.
//!
//! Assertions read the same as on a deep node: `mock.field("save").spy()`
//! returns the member's stub.

use crate::cache::IdentityCache;
use mocktree_core::{MockConfig, PropertyKey, Result};
use mocktree_stub::Stub;
use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

struct ShallowLevel {
    stubs: IdentityCache<PropertyKey, Stub>,
    config: MockConfig,
}

/// Mock of `T` whose members are independent stubs
///
/// Clones share the same members.
pub struct ShallowMock<T: ?Sized> {
    level: Arc<ShallowLevel>,
    _shape: PhantomData<fn(&T)>,
}

impl<T: ?Sized> ShallowMock<T> {
    /// Create a shallow mock with the default configuration
    pub fn new() -> Self {
        Self::from_config(MockConfig::default())
    }

    /// Create a shallow mock with `config`
    ///
    /// # Errors
    ///
    /// Returns [`mocktree_core::MockError::InvalidConfig`] if `config` does not validate.
    pub fn with_config(config: MockConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: MockConfig) -> Self {
        debug!(target: "mocktree::shallow", shape = type_name::<T>(), "Shallow mock created");
        ShallowMock {
            level: Arc::new(ShallowLevel {
                stubs: IdentityCache::new(),
                config,
            }),
            _shape: PhantomData,
        }
    }

    /// Stub for the member `key`, created on first access
    pub fn field(&self, key: impl Into<PropertyKey>) -> Arc<Stub> {
        let level = &self.level;
        level.stubs.get_or_insert_with(key.into(), |key| {
            debug!(target: "mocktree::shallow", member = %key, "Stub materialized");
            Stub::named(key.to_string()).with_default_return(level.config.default_return.clone())
        })
    }

    /// Materialized member keys
    pub fn fields(&self) -> Vec<PropertyKey> {
        self.level.stubs.keys()
    }

    /// Configuration of this mock
    pub fn config(&self) -> &MockConfig {
        &self.level.config
    }

    /// Drop the call history of every member, keeping behaviors
    pub fn clear_all(&self) {
        for stub in self.level.stubs.values() {
            stub.clear();
        }
    }

    /// Drop call history and behaviors of every member
    pub fn reset_all(&self) {
        for stub in self.level.stubs.values() {
            stub.reset();
        }
    }
}

/// Create a shallow mock of `T`
pub fn shallow_mock<T: ?Sized>() -> ShallowMock<T> {
    ShallowMock::new()
}

/// Create a shallow mock of `T` with a custom configuration
///
/// # Errors
///
/// Returns [`mocktree_core::MockError::InvalidConfig`] if `config` does not validate.
pub fn shallow_mock_with_config<T: ?Sized>(config: MockConfig) -> Result<ShallowMock<T>> {
    ShallowMock::with_config(config)
}

impl<T: ?Sized> Clone for ShallowMock<T> {
    fn clone(&self) -> Self {
        ShallowMock {
            level: Arc::clone(&self.level),
            _shape: PhantomData,
        }
    }
}

impl<T: ?Sized> Default for ShallowMock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ShallowMock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShallowMock")
            .field("shape", &type_name::<T>())
            .field("fields", &self.level.stubs)
            .finish()
    }
}
