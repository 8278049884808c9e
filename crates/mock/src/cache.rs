//! Identity cache backing one level of a mock
//!
//! Maps a key to the node built for it the first time it was seen. Values are
//! handed out as `Arc`s, and the same key always yields the same allocation:
//! nothing is ever evicted or replaced. Tests rely on this to capture a member
//! once and keep interacting with it through other expressions.
//!
//! # Design
//!
//! - FxHashMap behind a parking_lot RwLock
//! - Lookups of existing keys take only the read lock
//! - First-insert-wins: a racing or repeated `put` returns the resident value

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Memoizing key → `Arc<V>` map scoped to one mock level
pub struct IdentityCache<K, V> {
    entries: RwLock<FxHashMap<K, Arc<V>>>,
}

impl<K, V> IdentityCache<K, V>
where
    K: Eq + Hash,
{
    /// Create an empty cache
    pub fn new() -> Self {
        IdentityCache {
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// Value previously stored under `key`
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.read().get(key).cloned()
    }

    /// Store `value` under `key` unless the key is taken
    ///
    /// Returns the value now resident under `key`: `value` itself on first
    /// insert, the earlier value otherwise.
    pub fn put(&self, key: K, value: Arc<V>) -> Arc<V> {
        Arc::clone(self.entries.write().entry(key).or_insert(value))
    }

    /// Value under `key`, building it with `make` on first access
    ///
    /// `make` runs at most once per key and under the write lock, so it must
    /// not touch this same cache.
    pub fn get_or_insert_with<F>(&self, key: K, make: F) -> Arc<V>
    where
        F: FnOnce(&K) -> V,
    {
        if let Some(existing) = self.entries.read().get(&key) {
            return Arc::clone(existing);
        }
        let mut entries = self.entries.write();
        if let Some(existing) = entries.get(&key) {
            return Arc::clone(existing);
        }
        let value = Arc::new(make(&key));
        entries.insert(key, Arc::clone(&value));
        value
    }

    /// Number of materialized keys
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True until the first key materializes
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of the materialized values
    pub fn values(&self) -> Vec<Arc<V>> {
        self.entries.read().values().cloned().collect()
    }

    /// Consume the cache, yielding its values
    pub fn into_values(self) -> Vec<Arc<V>> {
        self.entries.into_inner().into_values().collect()
    }
}

impl<K, V> IdentityCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Snapshot of the materialized keys
    pub fn keys(&self) -> Vec<K> {
        self.entries.read().keys().cloned().collect()
    }
}

impl<K: Eq + Hash, V> Default for IdentityCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V> fmt::Debug for IdentityCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.read().keys()).finish()
    }
}
