//! Handler for original URL lookup.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::lookup::OriginalUrlResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the long URL behind a short code without counting a click.
///
/// # Endpoint
///
/// `GET /url/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<OriginalUrlResponse>, AppError> {
    let record = state.shortener.lookup(&code).await?;

    Ok(Json(OriginalUrlResponse {
        long_url: record.long_url,
    }))
}
