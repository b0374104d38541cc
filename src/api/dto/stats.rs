//! DTO for click statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::ClickStats;

/// Click statistics for a short code.
///
/// `last_clicked` is always serialized, as `null` when unknown.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickStatsResponse {
    pub clicks: u64,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl From<ClickStats> for ClickStatsResponse {
    fn from(stats: ClickStats) -> Self {
        Self {
            clicks: stats.clicks,
            last_clicked: stats.last_clicked,
        }
    }
}
