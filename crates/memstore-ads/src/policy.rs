use std::path::Path;

use memstore::{ValidatingStore, Validator, ValidatorChain, Verdict};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ad::Ad;
use crate::error::{AdsError, Result};
use crate::AdStore;

/// Default upper bound on description length, in characters.
pub const DEFAULT_MAX_DESCRIPTION_LEN: usize = 20;

/// Write policy for ads.
///
/// Loaded from TOML; every field is optional and falls back to the default:
///
/// ```toml
/// max_description_len = 20
/// require_title = true
/// min_price = 0
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdPolicy {
    /// Longest accepted description, in characters.
    pub max_description_len: usize,
    /// Reject ads whose title is blank.
    pub require_title: bool,
    /// Reject ads priced below this amount.
    pub min_price: Option<i64>,
}

impl Default for AdPolicy {
    fn default() -> Self {
        Self {
            max_description_len: DEFAULT_MAX_DESCRIPTION_LEN,
            require_title: false,
            min_price: None,
        }
    }
}

impl AdPolicy {
    /// Parse a policy from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| AdsError::Config(e.to_string()))
    }

    /// Read and parse a policy file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let policy = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), ?policy, "loaded ad policy");
        Ok(policy)
    }

    /// Build the validator chain this policy describes.
    ///
    /// The description rule always runs first; the title and price rules
    /// are added only when enabled.
    pub fn validator(&self) -> ValidatorChain<Ad> {
        let mut chain = ValidatorChain::new();
        chain.push(DescriptionLength::new(self.max_description_len));
        if self.require_title {
            chain.push(TitleRequired);
        }
        if let Some(min) = self.min_price {
            chain.push(MinPrice::new(min));
        }
        chain
    }

    /// Create an empty ad store that enforces this policy.
    pub fn build_store(&self) -> AdStore {
        ValidatingStore::new(self.validator())
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Rejects descriptions longer than `max` characters.
#[derive(Clone, Copy, Debug)]
pub struct DescriptionLength {
    max: usize,
}

impl DescriptionLength {
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Validator<Ad> for DescriptionLength {
    fn name(&self) -> &str {
        "description-length"
    }

    fn validate(&self, ad: &Ad) -> Verdict {
        if ad.description_len() > self.max {
            return Verdict::reject(format!(
                "description must be {} characters or less",
                self.max
            ));
        }
        Verdict::Accept
    }
}

/// Rejects blank titles.
#[derive(Clone, Copy, Debug)]
pub struct TitleRequired;

impl Validator<Ad> for TitleRequired {
    fn name(&self) -> &str {
        "title"
    }

    fn validate(&self, ad: &Ad) -> Verdict {
        if ad.title.trim().is_empty() {
            return Verdict::reject("title must not be empty");
        }
        Verdict::Accept
    }
}

/// Rejects prices below a floor.
#[derive(Clone, Copy, Debug)]
pub struct MinPrice {
    min: i64,
}

impl MinPrice {
    pub fn new(min: i64) -> Self {
        Self { min }
    }
}

impl Validator<Ad> for MinPrice {
    fn name(&self) -> &str {
        "price"
    }

    fn validate(&self, ad: &Ad) -> Verdict {
        if ad.price < self.min {
            return Verdict::reject(format!("price must be at least {}", self.min));
        }
        Verdict::Accept
    }
}
