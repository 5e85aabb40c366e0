//! Classified-ad records stored through a validating [`memstore`] store.
//!
//! # Modules
//!
//! - [`ad`] -- the [`Ad`] record and JSON parsing
//! - [`policy`] -- [`AdPolicy`], the configurable write policy, and its rules
//! - [`ingest`] -- bulk writes with a per-ad accepted/rejected report
//! - [`error`] -- error types for this crate

pub mod ad;
pub mod error;
pub mod ingest;
pub mod policy;

pub use ad::{parse_ads, Ad};
pub use error::{AdsError, Result};
pub use ingest::{ingest, IngestReport, Rejection};
pub use policy::{AdPolicy, DescriptionLength, MinPrice, TitleRequired};

/// A validating store of ads keyed by ad ID.
pub type AdStore = memstore::ValidatingStore<String, Ad>;
