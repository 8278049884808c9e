//! Hybrid mock node
//!
//! A [`MockNode`] plays two roles at once:
//!
//! - **Callable**: `call` / `call_async` forward to the node's own [`Stub`],
//!   and `Deref<Target = Stub>` exposes the stub's configuration and
//!   inspection surface (`node.return_value(..)`, `node.calls()`, ...).
//! - **Navigable**: `field(key)` returns a child node from a nested deep level
//!   that is created on first navigation and kept for the node's lifetime.
//!
//! The two roles never touch each other's state: calling a node records only
//! on its stub, navigating only grows its child level.
//!
//! `spy()` is the escape hatch for assertions. It is a method, not a member,
//! so no member name is reserved: `node.field("spy")` is an ordinary child.
//!
//! Members that hold plain data on the real type are nodes too. A test reads
//! their configured value by calling them; there is no separate "leaf value"
//! kind.

use crate::deep::DeepLevel;
use mocktree_core::{MockConfig, MockPath, PropertyKey, StubResult, Value};
use mocktree_stub::{Stub, StubFuture};
use once_cell::sync::OnceCell;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Node of a deep mock tree: a stub that is also a mock of its own members
pub struct MockNode {
    path: MockPath,
    stub: Arc<Stub>,
    children: OnceCell<DeepLevel>,
    config: Arc<MockConfig>,
}

impl MockNode {
    pub(crate) fn new(path: MockPath, config: Arc<MockConfig>) -> Self {
        let name = {
            let path = path.clone();
            let config = Arc::clone(&config);
            move || path.render(&config.path_separator)
        };
        let stub = Stub::named_with(name).with_default_return(config.default_return.clone());
        MockNode {
            path,
            stub: Arc::new(stub),
            children: OnceCell::new(),
            config,
        }
    }

    /// The stub this node forwards calls to
    ///
    /// Always the same allocation; never a child node.
    pub fn spy(&self) -> &Arc<Stub> {
        &self.stub
    }

    /// Invoke the node synchronously
    pub fn call(&self, args: Vec<Value>) -> StubResult {
        self.stub.call(args)
    }

    /// Invoke the node asynchronously
    pub fn call_async(&self, args: Vec<Value>) -> StubFuture {
        self.stub.call_async(args)
    }

    /// Child node for `key`, created on first access
    pub fn field(&self, key: impl Into<PropertyKey>) -> Arc<MockNode> {
        self.children().field(key.into())
    }

    /// Descendant at a separator-delimited path relative to this node
    pub fn at(&self, path: &str) -> Arc<MockNode> {
        self.children().at(path)
    }

    /// Keys from the root mock to this node
    pub fn path(&self) -> &MockPath {
        &self.path
    }

    /// Whether this node has ever been navigated
    pub fn has_children(&self) -> bool {
        self.children.get().is_some()
    }

    /// Materialized child keys
    pub fn fields(&self) -> Vec<PropertyKey> {
        self.children
            .get()
            .map(DeepLevel::fields)
            .unwrap_or_default()
    }

    pub(crate) fn child_level(&self) -> Option<&DeepLevel> {
        self.children.get()
    }

    fn children(&self) -> &DeepLevel {
        self.children
            .get_or_init(|| DeepLevel::new(self.path.clone(), Arc::clone(&self.config)))
    }
}

impl Drop for MockNode {
    fn drop(&mut self) {
        // Detach descendants through a worklist so deep chains don't drop recursively
        let mut pending = match self.children.take() {
            Some(level) => level.into_nodes(),
            None => return,
        };
        while let Some(node) = pending.pop() {
            if let Some(mut node) = Arc::into_inner(node) {
                if let Some(level) = node.children.take() {
                    pending.extend(level.into_nodes());
                }
            }
        }
    }
}

impl Deref for MockNode {
    type Target = Stub;

    fn deref(&self) -> &Stub {
        &self.stub
    }
}

impl fmt::Debug for MockNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockNode")
            .field("path", &self.path.render(&self.config.path_separator))
            .field("stub", &self.stub)
            .field("fields", &self.fields())
            .finish()
    }
}
