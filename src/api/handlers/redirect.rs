//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::HeaderValue,
    response::Redirect,
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Click Tracking
///
/// The click counter is incremented atomically in the store before the
/// response is sent. Whether an increment failure fails the redirect is set
/// by `CLICK_FAILURE_POLICY`.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let long_url = state.shortener.resolve_and_count(&code).await?;

    Ok(Redirect::temporary(&location(long_url)?))
}

/// `Location` value for a stored URL.
///
/// ASCII URLs that are valid header values are sent verbatim. Anything else,
/// non-ASCII characters in particular, is sent in its percent-encoded
/// serialization.
fn location(long_url: String) -> Result<String, AppError> {
    if long_url.is_ascii() && HeaderValue::from_str(&long_url).is_ok() {
        return Ok(long_url);
    }

    Url::parse(&long_url).map(String::from).map_err(|e| {
        AppError::internal(
            "Stored URL cannot be redirected to",
            json!({ "reason": e.to_string() }),
        )
    })
}
