//! Typed in-memory key-value storage with pluggable write validation.
//!
//! A store holds at most one value per key, for a single declared key type
//! and value type per instance. Every store implements the two-operation
//! [`Store`] capability, so callers that only need `find`/`store` never care
//! which backend or decorator they were handed.
//!
//! # Stores
//!
//! - [`InMemoryStore`] -- `HashMap`-backed base store
//! - [`ValidatingStore`] -- decorator that runs a [`Validator`] before every
//!   write and rejects invalid values without touching the inner store
//!
//! # Validation
//!
//! A validator is any `Fn(&V) -> Verdict`, or a type implementing
//! [`Validator`]. Several validators can be combined with
//! [`ValidatorChain`], which evaluates them in order and stops at the first
//! rejection.
//!
//! ```rust
//! use memstore::{Store, ValidatingStore, Verdict};
//!
//! let store = ValidatingStore::new(|name: &String| {
//!     if name.len() > 8 {
//!         Verdict::reject("name must be 8 characters or less")
//!     } else {
//!         Verdict::Accept
//!     }
//! });
//!
//! assert!(store.store("a", "short".to_string()).is_ok());
//! assert!(store.store("b", "far too long".to_string()).is_err());
//! assert_eq!(store.find(&"b"), None);
//! ```
//!
//! # Design Rules
//!
//! 1. Absence is not an error: `find` returns `Option`.
//! 2. Overwrites are silent; the last write wins.
//! 3. Validation happens strictly before mutation.
//! 4. Writes are atomic with respect to each other. A store can be shared
//!    across threads whenever its keys and values can.

pub mod error;
pub mod memory;
pub mod traits;
pub mod validating;
pub mod validator;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use traits::Store;
pub use validating::ValidatingStore;
pub use validator::{Named, Validator, ValidatorChain, Verdict};
