//! DTO for original URL lookup.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalUrlResponse {
    pub long_url: String,
}
