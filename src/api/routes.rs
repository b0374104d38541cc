//! API route configuration.

use crate::api::handlers::{
    health_handler, lookup_handler, redirect_handler, shorten_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All service routes.
///
/// # Endpoints
///
/// - `POST /url`           - Create a short URL
/// - `GET  /url/{code}`    - Original URL for a code
/// - `GET  /stats/{code}`  - Click statistics for a code
/// - `GET  /health`        - Record store health
/// - `GET  /{code}`        - Redirect to the original URL
///
/// Static segments take priority over `/{code}`, and generated codes are
/// always 8 characters, so `health` never shadows a short link.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/url", post(shorten_handler))
        .route("/url/{code}", get(lookup_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
}
