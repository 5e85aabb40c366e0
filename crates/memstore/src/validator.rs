//! Write validation policies.
//!
//! A [`Validator`] inspects a value before it is stored and returns a
//! [`Verdict`]. Closures of the form `Fn(&V) -> Verdict` are validators, so a
//! policy can be injected as a plain function. [`ValidatorChain`] runs several
//! validators in order and stops at the first rejection.

use std::fmt;

use tracing::debug;

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// The outcome of validating a single value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The value may be written.
    Accept,
    /// The value must not be written.
    Reject { reason: String },
}

impl Verdict {
    /// Create a rejection with a human-readable reason.
    pub fn reject(reason: impl Into<String>) -> Self {
        Self::Reject {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the value was accepted.
    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }

    /// Returns `true` if the value was rejected.
    pub fn is_reject(&self) -> bool {
        matches!(self, Self::Reject { .. })
    }

    /// The rejection reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Accept => None,
            Self::Reject { reason } => Some(reason),
        }
    }
}

impl<E: fmt::Display> From<Result<(), E>> for Verdict {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::Accept,
            Err(e) => Self::reject(e.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Validator trait
// ---------------------------------------------------------------------------

/// A pure predicate over values of type `V`.
///
/// Validators may be invoked from several threads at once when the store they
/// guard is shared, so they must be `Send + Sync` and free of side effects.
pub trait Validator<V>: Send + Sync {
    /// Short name used to label rejections (e.g. "description-length").
    fn name(&self) -> &str {
        "validator"
    }

    /// Decide whether `value` may be written.
    fn validate(&self, value: &V) -> Verdict;
}

impl<V, F> Validator<V> for F
where
    F: Fn(&V) -> Verdict + Send + Sync,
{
    fn validate(&self, value: &V) -> Verdict {
        self(value)
    }
}

// ---------------------------------------------------------------------------
// Named
// ---------------------------------------------------------------------------

/// Attaches a name to a closure validator.
pub struct Named<F> {
    name: String,
    check: F,
}

impl<F> Named<F> {
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<V, F> Validator<V> for Named<F>
where
    F: Fn(&V) -> Verdict + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, value: &V) -> Verdict {
        (self.check)(value)
    }
}

// ---------------------------------------------------------------------------
// ValidatorChain
// ---------------------------------------------------------------------------

/// An ordered pipeline of validators.
///
/// The chain is **fail-fast**: the first validator that rejects stops
/// evaluation and its reason is returned unchanged. The failing validator's
/// name is only recorded in the log event. An empty chain accepts every value.
pub struct ValidatorChain<V> {
    validators: Vec<Box<dyn Validator<V>>>,
}

impl<V> ValidatorChain<V> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Append a validator to the end of the chain.
    pub fn push(&mut self, validator: impl Validator<V> + 'static) {
        self.validators.push(Box::new(validator));
    }

    /// Builder form of [`Self::push`].
    pub fn with(mut self, validator: impl Validator<V> + 'static) -> Self {
        self.push(validator);
        self
    }

    /// Number of validators in the chain.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Names of the validators, in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.name()).collect()
    }
}

impl<V> Default for ValidatorChain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Validator<V> for ValidatorChain<V> {
    fn name(&self) -> &str {
        "chain"
    }

    fn validate(&self, value: &V) -> Verdict {
        for validator in &self.validators {
            let verdict = validator.validate(value);
            if let Verdict::Reject { reason } = &verdict {
                debug!(validator = validator.name(), %reason, "chain rejected value");
                return verdict;
            }
        }
        Verdict::Accept
    }
}

impl<V> fmt::Debug for ValidatorChain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("validators", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn max_len(limit: usize) -> Named<impl Fn(&String) -> Verdict + Send + Sync> {
        Named::new("max-len", move |s: &String| {
            if s.chars().count() > limit {
                Verdict::reject(format!("must be {limit} characters or less"))
            } else {
                Verdict::Accept
            }
        })
    }

    fn non_empty() -> Named<impl Fn(&String) -> Verdict + Send + Sync> {
        Named::new("non-empty", |s: &String| {
            if s.trim().is_empty() {
                Verdict::reject("must not be empty")
            } else {
                Verdict::Accept
            }
        })
    }

    #[test]
    fn closure_is_a_validator() {
        let positive = |n: &i32| {
            if *n > 0 {
                Verdict::Accept
            } else {
                Verdict::reject("must be positive")
            }
        };
        assert!(positive.validate(&3).is_accept());
        assert_eq!(positive.validate(&-1).reason(), Some("must be positive"));
        assert_eq!(Validator::<i32>::name(&positive), "validator");
    }

    #[test]
    fn verdict_from_result() {
        let ok: Result<(), String> = Ok(());
        assert_eq!(Verdict::from(ok), Verdict::Accept);

        let err: Result<(), String> = Err("too long".into());
        assert_eq!(Verdict::from(err), Verdict::reject("too long"));
    }

    #[test]
    fn empty_chain_accepts() {
        let chain = ValidatorChain::<String>::new();
        assert!(chain.is_empty());
        assert!(chain.validate(&String::new()).is_accept());
    }

    #[test]
    fn chain_accepts_when_all_pass() {
        let chain = ValidatorChain::<String>::new().with(non_empty()).with(max_len(5));
        assert_eq!(chain.len(), 2);
        assert!(chain.validate(&"abc".to_string()).is_accept());
    }

    #[test]
    fn chain_passes_reason_through_unchanged() {
        let chain = ValidatorChain::<String>::new().with(non_empty()).with(max_len(5));
        let verdict = chain.validate(&"abcdefgh".to_string());
        assert_eq!(verdict, Verdict::reject("must be 5 characters or less"));
    }

    #[test]
    fn chain_is_fail_fast() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let chain = ValidatorChain::<String>::new()
            .with(non_empty())
            .with(Named::new("counting", move |_: &String| {
                counter.fetch_add(1, Ordering::SeqCst);
                Verdict::Accept
            }));

        assert!(chain.validate(&"   ".to_string()).is_reject());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(chain.validate(&"ok".to_string()).is_accept());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn chain_debug_lists_names() {
        let chain = ValidatorChain::<String>::new().with(non_empty()).with(max_len(5));
        let debug = format!("{chain:?}");
        assert!(debug.contains("non-empty"));
        assert!(debug.contains("max-len"));
    }
}
