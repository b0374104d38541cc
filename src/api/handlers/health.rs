//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use std::time::Instant;

use crate::api::dto::health::{HealthResponse, StoreCheck};
use crate::state::AppState;

/// Reports whether the record store answers a ping.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Record store reachable
/// - **503 Service Unavailable**: Ping failed or exceeded the store timeout
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": { "store": { "status": "ok", "latencyMs": 1 } }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let started = Instant::now();
    let result = state.shortener.health().await;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let check = match result {
        Ok(()) => StoreCheck::ok(latency_ms),
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            StoreCheck::failed(latency_ms, format!("Store error: {}", e))
        }
    };

    let response = HealthResponse::from_store_check(check);
    let status = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
