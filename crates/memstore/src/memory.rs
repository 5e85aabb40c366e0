use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::StoreResult;
use crate::traits::Store;

/// In-memory, HashMap-based key-value store.
///
/// All entries are held in memory behind a `RwLock` so a single store can be
/// shared across threads. Values are cloned on read and write. Data is lost
/// when the store is dropped.
pub struct InMemoryStore<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryStore<K, V>
where
    K: Eq + Hash,
{
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    /// Returns `true` if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    /// Return a sorted list of all keys in the store.
    pub fn keys(&self) -> Vec<K>
    where
        K: Ord + Clone,
    {
        let map = self.read_entries();
        let mut keys: Vec<K> = map.keys().cloned().collect();
        keys.sort();
        keys
    }

    // A writer that panics mid-insert cannot leave a torn entry in a
    // HashMap, so a poisoned lock still guards a consistent map.
    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<K, V>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<K, V>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> Default for InMemoryStore<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Store<K, V> for InMemoryStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn find(&self, key: &K) -> Option<V> {
        self.read_entries().get(key).cloned()
    }

    fn store(&self, key: K, value: V) -> StoreResult<V> {
        let mut map = self.write_entries();
        let replaced = map.insert(key, value.clone()).is_some();
        debug!(replaced, entries = map.len(), "stored value");
        Ok(value)
    }
}

impl<K, V> std::fmt::Debug for InMemoryStore<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("entry_count", &self.len())
            .finish()
    }
}
