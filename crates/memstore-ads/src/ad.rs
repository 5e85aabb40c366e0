use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AdsError, Result};

/// A classified ad.
///
/// Every field has a default so partially filled JSON records still decode;
/// the write policy decides whether such a record may be stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ad {
    /// Store key. Empty until assigned.
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// Price in whole currency units.
    pub price: i64,
}

impl Ad {
    /// Create an ad with a fresh time-ordered ID and the current timestamp.
    pub fn new(title: impl Into<String>, description: impl Into<String>, price: i64) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            title: title.into(),
            description: description.into(),
            created_at: Utc::now(),
            price,
        }
    }

    /// Replace the generated ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Assign a fresh ID if the ad has none. Returns the ID.
    pub fn ensure_id(&mut self) -> &str {
        if self.id.is_empty() {
            self.id = Uuid::now_v7().to_string();
        }
        &self.id
    }

    /// Description length in characters.
    pub fn description_len(&self) -> usize {
        self.description.chars().count()
    }
}

/// Decode a JSON array of ads.
pub fn parse_ads(json: &str) -> Result<Vec<Ad>> {
    serde_json::from_str(json).map_err(|e| AdsError::Serialization(e.to_string()))
}
