//! Deep mock factory
//!
//! [`deep_mock`] returns a [`DeepMock`] whose every member is a memoized
//! [`MockNode`]. Each node lazily owns a nested level of the same kind, so a
//! path of any length resolves without declaring it first:
//!
//! ```
//! use mocktree_core::args;
//! use mocktree_mock::deep_mock;
//!
//! let mock = deep_mock::<()>();
//! mock.field("x").field("y").field("z").field("w").call(args![]).unwrap();
//! assert!(mock.at("x.y.z.w").was_called());
//! ```

use crate::cache::IdentityCache;
use crate::node::MockNode;
use mocktree_core::{MockConfig, MockPath, PropertyKey, Result};
use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// One level of a deep mock: key → node
pub(crate) struct DeepLevel {
    path: MockPath,
    nodes: IdentityCache<PropertyKey, MockNode>,
    config: Arc<MockConfig>,
}

impl DeepLevel {
    pub(crate) fn new(path: MockPath, config: Arc<MockConfig>) -> Self {
        DeepLevel {
            path,
            nodes: IdentityCache::new(),
            config,
        }
    }

    pub(crate) fn field(&self, key: PropertyKey) -> Arc<MockNode> {
        self.nodes.get_or_insert_with(key, |key| {
            let path = self.path.child(key.clone());
            debug!(
                target: "mocktree::deep",
                path = %path.render(&self.config.path_separator),
                "Node materialized"
            );
            MockNode::new(path, Arc::clone(&self.config))
        })
    }

    pub(crate) fn at(&self, path: &str) -> Arc<MockNode> {
        let mut keys = MockPath::parse_keys(path, &self.config.path_separator).into_iter();
        // split() yields at least one segment, even for ""
        let first = keys.next().unwrap_or_else(|| PropertyKey::from(path));
        keys.fold(self.field(first), |node, key| node.field(key))
    }

    pub(crate) fn fields(&self) -> Vec<PropertyKey> {
        self.nodes.keys()
    }

    /// Visit every materialized node below this level, parents before children
    pub(crate) fn for_each_node(&self, mut visit: impl FnMut(&MockNode)) {
        let mut pending = self.nodes.values();
        while let Some(node) = pending.pop() {
            visit(&node);
            if let Some(children) = node.child_level() {
                pending.extend(children.nodes.values());
            }
        }
    }

    /// Take the nodes out of this level
    pub(crate) fn into_nodes(self) -> Vec<Arc<MockNode>> {
        self.nodes.into_values()
    }
}

/// Root of a deep mock tree shaped like `T`
///
/// `T` only tags the mock with the collaborator it stands in for; any member
/// name is accepted. Clones share the same tree.
pub struct DeepMock<T: ?Sized> {
    level: Arc<DeepLevel>,
    _shape: PhantomData<fn(&T)>,
}

impl<T: ?Sized> DeepMock<T> {
    /// Create a deep mock with the default configuration
    pub fn new() -> Self {
        Self::from_config(MockConfig::default())
    }

    /// Create a deep mock with `config`
    ///
    /// # Errors
    ///
    /// Returns [`mocktree_core::MockError::InvalidConfig`] if `config` does not validate.
    pub fn with_config(config: MockConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: MockConfig) -> Self {
        debug!(target: "mocktree::deep", shape = type_name::<T>(), "Deep mock created");
        DeepMock {
            level: Arc::new(DeepLevel::new(MockPath::root(), Arc::new(config))),
            _shape: PhantomData,
        }
    }

    /// Node for the member `key`, created on first access
    pub fn field(&self, key: impl Into<PropertyKey>) -> Arc<MockNode> {
        self.level.field(key.into())
    }

    /// Node at a separator-delimited path, e.g. `"auth.service.sign_up"`
    pub fn at(&self, path: &str) -> Arc<MockNode> {
        self.level.at(path)
    }

    /// Materialized top-level member keys
    pub fn fields(&self) -> Vec<PropertyKey> {
        self.level.fields()
    }

    /// Configuration shared by every node of this tree
    pub fn config(&self) -> &MockConfig {
        &self.level.config
    }

    /// Drop the call history of every materialized node, keeping behaviors
    pub fn clear_all(&self) {
        self.level.for_each_node(|node| node.clear());
    }

    /// Drop call history and behaviors of every materialized node
    pub fn reset_all(&self) {
        self.level.for_each_node(|node| node.reset());
    }
}

/// Create a deep mock of `T`
pub fn deep_mock<T: ?Sized>() -> DeepMock<T> {
    DeepMock::new()
}

/// Create a deep mock of `T` with a custom configuration
///
/// # Errors
///
/// Returns [`mocktree_core::MockError::InvalidConfig`] if `config` does not validate.
pub fn deep_mock_with_config<T: ?Sized>(config: MockConfig) -> Result<DeepMock<T>> {
    DeepMock::with_config(config)
}

impl<T: ?Sized> Clone for DeepMock<T> {
    fn clone(&self) -> Self {
        DeepMock {
            level: Arc::clone(&self.level),
            _shape: PhantomData,
        }
    }
}

impl<T: ?Sized> Default for DeepMock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for DeepMock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepMock")
            .field("shape", &type_name::<T>())
            .field("fields", &self.fields())
            .finish()
    }
}
