//! The validating decorator.
//!
//! [`ValidatingStore`] owns an inner store and a [`Validator`]. Reads pass
//! straight through; writes are validated first and only reach the inner
//! store when the validator accepts them.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::memory::InMemoryStore;
use crate::traits::Store;
use crate::validator::{Validator, Verdict};

/// A store that rejects invalid values before they are written.
///
/// The inner store never observes a value that failed validation: on
/// rejection `store` returns [`StoreError::Validation`] and neither inserts
/// nor overwrites the key. The validator is fixed at construction.
pub struct ValidatingStore<K, V, S = InMemoryStore<K, V>> {
    inner: S,
    validator: Box<dyn Validator<V>>,
    _key: PhantomData<fn() -> K>,
}

impl<K, V> ValidatingStore<K, V>
where
    K: Eq + Hash,
{
    /// Create a validating store backed by a fresh [`InMemoryStore`].
    pub fn new(validator: impl Validator<V> + 'static) -> Self {
        Self::wrap(InMemoryStore::new(), validator)
    }
}

impl<K, V, S> ValidatingStore<K, V, S> {
    /// Wrap an existing store.
    ///
    /// Values already present in `inner` are not re-validated.
    pub fn wrap(inner: S, validator: impl Validator<V> + 'static) -> Self {
        Self {
            inner,
            validator: Box::new(validator),
            _key: PhantomData,
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Consume the decorator and return the wrapped store.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Name of the active validator.
    pub fn validator_name(&self) -> &str {
        self.validator.name()
    }
}

impl<K, V, S> Store<K, V> for ValidatingStore<K, V, S>
where
    S: Store<K, V>,
{
    fn find(&self, key: &K) -> Option<V> {
        self.inner.find(key)
    }

    fn store(&self, key: K, value: V) -> StoreResult<V> {
        if let Verdict::Reject { reason } = self.validator.validate(&value) {
            debug!(validator = self.validator.name(), %reason, "rejected write");
            return Err(StoreError::Validation { reason });
        }
        self.inner.store(key, value)
    }
}

impl<K, V, S: fmt::Debug> fmt::Debug for ValidatingStore<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatingStore")
            .field("inner", &self.inner)
            .field("validator", &self.validator.name())
            .finish()
    }
}
