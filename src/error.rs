//! Application error type and its HTTP representation.
//!
//! Every fallible operation in the service returns [`AppError`]. Handlers
//! return it directly and axum renders it through [`IntoResponse`] as
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short code not found", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

const VALIDATION_MESSAGE: &str = "Request validation failed";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload shared by all error responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors surfaced by the shortener service and its record stores.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input: invalid URL, missing field, unparsable body.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown short code.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The backing store timed out or could not be reached.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Validation error for a single request field, shaped like the
    /// `validator` conversion below.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::validation(
            VALIDATION_MESSAGE,
            json!({ "fields": { field: [message.into()] } }),
        )
    }

    /// Not-found error for a short code, used by every read path.
    pub fn code_not_found(code: &str) -> Self {
        Self::not_found("Short code not found", json!({ "code": code }))
    }

    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::StoreUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable")
            }
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.status_and_code();
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::StoreUnavailable { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (wire_field_name(&field), json!(messages))
            })
            .collect();

        AppError::validation(VALIDATION_MESSAGE, json!({ "fields": fields }))
    }
}

/// Rust field name as it appears on the wire (`long_url` -> `longUrl`).
fn wire_field_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        let reason = e.to_string();

        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => {
                AppError::store_unavailable("Database unavailable", json!({ "reason": reason }))
            }
            _ => AppError::internal("Database error", json!({ "reason": reason })),
        }
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        let reason = e.to_string();

        if e.is_io_error() || e.is_timeout() || e.is_connection_dropped() || e.is_connection_refusal()
        {
            AppError::store_unavailable("Redis unavailable", json!({ "reason": reason }))
        } else {
            AppError::internal("Redis error", json!({ "reason": reason }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::validation("bad", json!({})).status_and_code(),
            (StatusCode::UNPROCESSABLE_ENTITY, "validation_error")
        );
        assert_eq!(
            AppError::code_not_found("abc12345").status_and_code(),
            (StatusCode::NOT_FOUND, "not_found")
        );
        assert_eq!(
            AppError::store_unavailable("down", json!({})).status_and_code(),
            (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable")
        );
        assert_eq!(
            AppError::internal("boom", json!({})).status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        );
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::code_not_found("abc12345");
        assert_eq!(err.to_string(), "Short code not found");
    }

    #[test]
    fn test_error_info_carries_details() {
        let info = AppError::code_not_found("abc12345").to_error_info();
        assert_eq!(info.code, "not_found");
        assert_eq!(info.details["code"], "abc12345");
    }

    #[test]
    fn test_pool_timeout_is_store_unavailable() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::StoreUnavailable { .. }));
    }

    #[test]
    fn test_row_not_found_is_internal() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[test]
    fn test_wire_field_name() {
        assert_eq!(wire_field_name("long_url"), "longUrl");
        assert_eq!(wire_field_name("clicks"), "clicks");
    }

    #[test]
    fn test_validator_errors_use_wire_field_names() {
        let mut errors = validator::ValidationErrors::new();
        errors.add(
            "long_url",
            validator::ValidationError::new("url").with_message("bad".into()),
        );

        let err: AppError = errors.into();
        let info = err.to_error_info();
        assert_eq!(info.message, "Request validation failed");
        assert_eq!(info.details["fields"]["longUrl"][0], "bad");
    }

    #[test]
    fn test_invalid_field_matches_validator_shape() {
        let info = AppError::invalid_field("longUrl", "bad").to_error_info();
        assert_eq!(info.code, "validation_error");
        assert_eq!(info.message, "Request validation failed");
        assert_eq!(info.details, json!({ "fields": { "longUrl": ["bad"] } }));
    }
}
