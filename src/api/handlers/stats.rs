//! Handler for click statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::ClickStatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click count for a short code.
///
/// # Endpoint
///
/// `GET /stats/{code}`
///
/// # Response
///
/// ```json
/// { "clicks": 1, "lastClicked": null }
/// ```
///
/// `lastClicked` is always `null`; click times are not recorded.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ClickStatsResponse>, AppError> {
    let stats = state.shortener.stats(&code).await?;

    Ok(Json(stats.into()))
}
