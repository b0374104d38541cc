//! DTOs for health check endpoint.

use serde::Serialize;

/// Overall service state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

/// Outcome of a single component check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub store: StoreCheck,
}

/// Record store check result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCheck {
    pub status: CheckStatus,
    /// Round trip of the ping, in milliseconds.
    pub latency_ms: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StoreCheck {
    pub fn ok(latency_ms: u64) -> Self {
        Self {
            status: CheckStatus::Ok,
            latency_ms,
            message: None,
        }
    }

    pub fn failed(latency_ms: u64, message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Error,
            latency_ms,
            message: Some(message.into()),
        }
    }
}

impl HealthResponse {
    /// Builds the response; the service is healthy iff the store check passed.
    pub fn from_store_check(store: StoreCheck) -> Self {
        let status = match store.status {
            CheckStatus::Ok => ServiceStatus::Healthy,
            CheckStatus::Error => ServiceStatus::Degraded,
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: HealthChecks { store },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_healthy_serialization() {
        let response = HealthResponse::from_store_check(StoreCheck::ok(2));

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["checks"]["store"], json!({ "status": "ok", "latencyMs": 2 }));
    }

    #[test]
    fn test_failed_check_degrades_service() {
        let response = HealthResponse::from_store_check(StoreCheck::failed(1000, "timed out"));

        assert!(!response.is_healthy());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "degraded");
        assert_eq!(value["checks"]["store"]["status"], "error");
        assert_eq!(value["checks"]["store"]["message"], "timed out");
    }
}
