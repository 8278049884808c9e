//! Keys and paths for navigating a mock tree
//!
//! A mock member is addressed by a [`PropertyKey`]: either a plain name or a
//! [`Symbol`]. Symbols are unique markers; two symbols never compare equal
//! unless one is a clone of the other, even when their descriptions match.
//!
//! A [`MockPath`] is the ordered list of keys from a root mock down to one node.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// Unique marker usable as a property key
#[derive(Debug, Clone)]
pub struct Symbol {
    id: u64,
    description: Arc<str>,
}

impl Symbol {
    /// Create a fresh symbol, distinct from every other symbol in the process
    pub fn new(description: impl AsRef<str>) -> Self {
        Symbol {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: Arc::from(description.as_ref()),
        }
    }

    /// Human-readable description (not part of identity)
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/// Key of a mocked member
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// Named member
    Name(String),
    /// Symbol-keyed member
    Symbol(Symbol),
}

impl PropertyKey {
    /// Get the name if this is a Name key
    pub fn as_name(&self) -> Option<&str> {
        match self {
            PropertyKey::Name(name) => Some(name),
            PropertyKey::Symbol(_) => None,
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Name(name) => f.write_str(name),
            PropertyKey::Symbol(symbol) => write!(f, "[{}]", symbol),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        PropertyKey::Name(name.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        PropertyKey::Name(name)
    }
}

impl From<&String> for PropertyKey {
    fn from(name: &String) -> Self {
        PropertyKey::Name(name.clone())
    }
}

impl From<Symbol> for PropertyKey {
    fn from(symbol: Symbol) -> Self {
        PropertyKey::Symbol(symbol)
    }
}

impl From<&Symbol> for PropertyKey {
    fn from(symbol: &Symbol) -> Self {
        PropertyKey::Symbol(symbol.clone())
    }
}

/// Path from a root mock to one of its nodes
///
/// Stored as a chain of segments shared with the parent path: `child` is
/// O(1) and a deep tree holds each key once. Rendering walks the chain.
#[derive(Clone, Default)]
pub struct MockPath {
    tail: Option<Arc<Segment>>,
}

struct Segment {
    parent: Option<Arc<Segment>>,
    key: PropertyKey,
    depth: usize,
}

impl Drop for Segment {
    fn drop(&mut self) {
        // Unlink iteratively; a long chain would otherwise drop recursively
        let mut parent = self.parent.take();
        while let Some(segment) = parent {
            parent = match Arc::into_inner(segment) {
                Some(mut segment) => segment.parent.take(),
                None => None,
            };
        }
    }
}

impl MockPath {
    /// The empty path of a root mock
    pub fn root() -> Self {
        Self::default()
    }

    /// Path one level below this one
    pub fn child(&self, key: PropertyKey) -> Self {
        MockPath {
            tail: Some(Arc::new(Segment {
                parent: self.tail.clone(),
                key,
                depth: self.len() + 1,
            })),
        }
    }

    /// Path one level above this one, `None` at the root
    pub fn parent(&self) -> Option<MockPath> {
        self.tail.as_ref().map(|segment| MockPath {
            tail: segment.parent.clone(),
        })
    }

    /// Split a separator-delimited path into name keys
    ///
    /// Segments are taken verbatim: `"a..b"` yields `a`, an empty name, and `b`.
    pub fn parse_keys(path: &str, separator: &str) -> Vec<PropertyKey> {
        path.split(separator).map(PropertyKey::from).collect()
    }

    /// Keys from the root down
    pub fn keys(&self) -> Vec<PropertyKey> {
        let mut keys: Vec<PropertyKey> = self.keys_rev().cloned().collect();
        keys.reverse();
        keys
    }

    /// Last key, `None` at the root
    pub fn last(&self) -> Option<&PropertyKey> {
        self.tail.as_ref().map(|segment| &segment.key)
    }

    /// Number of keys (depth below the root)
    pub fn len(&self) -> usize {
        self.tail.as_ref().map_or(0, |segment| segment.depth)
    }

    /// True for the root path
    pub fn is_empty(&self) -> bool {
        self.tail.is_none()
    }

    /// Render the path joined by `separator`
    pub fn render(&self, separator: &str) -> String {
        let mut parts: Vec<String> = self.keys_rev().map(ToString::to_string).collect();
        parts.reverse();
        parts.join(separator)
    }

    /// Keys from this node up to the root
    fn keys_rev(&self) -> impl Iterator<Item = &PropertyKey> {
        std::iter::successors(self.tail.as_deref(), |segment| segment.parent.as_deref())
            .map(|segment| &segment.key)
    }
}

impl PartialEq for MockPath {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.tail.as_ref();
        let mut right = other.tail.as_ref();
        if self.len() != other.len() {
            return false;
        }
        loop {
            match (left, right) {
                (None, None) => return true,
                (Some(a), Some(b)) if Arc::ptr_eq(a, b) => return true,
                (Some(a), Some(b)) if a.key == b.key => {
                    left = a.parent.as_ref();
                    right = b.parent.as_ref();
                }
                _ => return false,
            }
        }
    }
}

impl Eq for MockPath {}

impl std::hash::Hash for MockPath {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for key in self.keys_rev() {
            key.hash(state);
        }
    }
}

impl fmt::Debug for MockPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

impl fmt::Display for MockPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render("."))
    }
}
