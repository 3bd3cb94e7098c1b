use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Application-level access token with its absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: i64, // UNIX timestamp
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_in_seconds: i64) -> Self {
        Self {
            value: value.into(),
            expires_at: Utc::now().timestamp().saturating_add(expires_in_seconds),
        }
    }

    /// True while the token has more than `safety_margin_seconds` left.
    pub fn is_fresh(&self, safety_margin_seconds: i64) -> bool {
        Utc::now().timestamp() < self.expires_at.saturating_sub(safety_margin_seconds)
    }
}
