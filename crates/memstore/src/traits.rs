//! The [`Store`] trait defining the key-value capability.
//!
//! Any backend or decorator implements this trait. Callers that depend only
//! on it cannot tell whether validation is present.

use std::sync::Arc;

use crate::error::StoreResult;

/// Typed key-value storage.
///
/// All implementations must satisfy these invariants:
/// - A key is present only if it was explicitly written through `store`.
/// - `store` followed by `find` on the same key returns the stored value.
/// - Writing an existing key replaces the previous value (last write wins).
/// - `find` is read-only and never fails.
///
/// The trait places no thread-safety bound on `K` or `V`. A store is
/// `Send`/`Sync` exactly when its contents are, so `Rc` values work in a
/// single-threaded store and callers that share a store across threads can
/// ask for `dyn Store<K, V> + Send + Sync`.
pub trait Store<K, V> {
    /// Look up the value stored at `key`.
    ///
    /// Returns `None` if the key was never written.
    fn find(&self, key: &K) -> Option<V>;

    /// Insert or overwrite the value at `key` and return the stored value.
    fn store(&self, key: K, value: V) -> StoreResult<V>;

    /// Look up `key`, returning `V::default()` and `false` when absent.
    fn find_or_default(&self, key: &K) -> (V, bool)
    where
        V: Default,
    {
        match self.find(key) {
            Some(value) => (value, true),
            None => (V::default(), false),
        }
    }

    /// Check whether `key` has been written.
    fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }
}

impl<K, V, S> Store<K, V> for Arc<S>
where
    S: Store<K, V> + ?Sized,
{
    fn find(&self, key: &K) -> Option<V> {
        (**self).find(key)
    }

    fn store(&self, key: K, value: V) -> StoreResult<V> {
        (**self).store(key, value)
    }
}

impl<K, V, S> Store<K, V> for Box<S>
where
    S: Store<K, V> + ?Sized,
{
    fn find(&self, key: &K) -> Option<V> {
        (**self).find(key)
    }

    fn store(&self, key: K, value: V) -> StoreResult<V> {
        (**self).store(key, value)
    }
}
