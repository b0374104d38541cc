//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://www.example.com/very/long/url" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortUrl": "http://localhost:8080/abc12345" }
/// ```
///
/// # Errors
///
/// Returns 422 Unprocessable Entity if the body is not JSON, `longUrl` is
/// missing, or the URL is not an absolute HTTP(S) URL. Nothing is stored in
/// that case.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::validation(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    payload.validate()?;

    let record = state.shortener.shorten(&payload.long_url).await?;

    Ok(Json(ShortenResponse {
        short_url: state.shortener.short_url(&record.short_code),
    }))
}
