//! Record store backends.
//!
//! - [`MemoryRecordStore`] - In-process map, used locally and in tests
//! - [`PgRecordStore`] - PostgreSQL via SQLx
//! - [`RedisRecordStore`] - One Redis hash per record
//!
//! Networked backends bound every call with [`bounded`], so an unreachable
//! backend fails the request with [`AppError::StoreUnavailable`] instead of hanging.

mod memory_store;
mod pg_record_store;
mod redis_record_store;

pub use memory_store::MemoryRecordStore;
pub use pg_record_store::PgRecordStore;
pub use redis_record_store::RedisRecordStore;

use crate::error::AppError;
use serde_json::json;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

/// Default per-call store timeout, in milliseconds.
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 1000;

/// Which [`crate::domain::repositories::RecordStore`] implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
    Redis,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "redis" => Ok(Self::Redis),
            other => Err(format!(
                "unknown store backend '{other}' (expected 'memory', 'postgres' or 'redis')"
            )),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Postgres => f.write_str("postgres"),
            Self::Redis => f.write_str("redis"),
        }
    }
}

/// Runs a store operation under `limit`.
///
/// An elapsed timeout becomes [`AppError::StoreUnavailable`] naming the
/// operation.
pub(crate) async fn bounded<T, F>(limit: Duration, operation: &'static str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::store_unavailable(
            "Record store timed out",
            json!({ "operation": operation, "timeout_ms": limit.as_millis() as u64 }),
        )),
    }
}
