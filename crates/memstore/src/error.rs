/// Errors from store operations.
///
/// Lookups never fail; a missing key is reported as `None`. The only
/// failure a write can produce today is a rejected value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The validator rejected the value. Nothing was written.
    #[error("value is invalid: {reason}")]
    Validation { reason: String },
}

impl StoreError {
    /// Create a validation error from a rejection reason.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// The rejection reason, if this is a validation error.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Validation { reason } => Some(reason),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
