//! Record entity: one stored short code and its target.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored association of a short code with its long URL.
///
/// `long_url` and `created_at` never change once the record exists; only
/// `clicks` is updated, and only upward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: u64,
    /// Reserved for user-chosen aliases. Always `false`.
    pub custom: bool,
}

impl Record {
    /// Builds a fresh record with zero clicks, stamped with the current time.
    pub fn new(short_code: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
            long_url: long_url.into(),
            created_at: Utc::now(),
            clicks: 0,
            custom: false,
        }
    }

    pub fn with_clicks(mut self, clicks: u64) -> Self {
        self.clicks = clicks;
        self
    }

    pub fn stats(&self) -> ClickStats {
        ClickStats {
            clicks: self.clicks,
            last_clicked: None,
        }
    }
}

/// Click statistics for a record.
///
/// `last_clicked` is never populated: no click timestamp is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickStats {
    pub clicks: u64,
    pub last_clicked: Option<DateTime<Utc>>,
}
