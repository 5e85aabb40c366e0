//! Error types for ad handling.

use memstore::StoreError;
use thiserror::Error;

/// Errors that can occur while loading policies or ads.
#[derive(Debug, Error)]
pub enum AdsError {
    /// The policy configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Ad data could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error while reading a policy or ad file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The store rejected a write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for ad operations.
pub type Result<T> = std::result::Result<T, AdsError>;
