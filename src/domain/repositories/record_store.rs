//! Record store contract.

use crate::domain::entities::Record;
use crate::error::AppError;
use async_trait::async_trait;

/// Key-value store for [`Record`]s, keyed by short code.
///
/// Backends only need point lookups, point inserts and an atomic numeric
/// increment on a single item. No scans, joins or transactions.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::MemoryRecordStore`] - in-process map
/// - [`crate::infrastructure::store::PgRecordStore`] - PostgreSQL
/// - [`crate::infrastructure::store::RedisRecordStore`] - Redis hashes
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Writes a record, replacing any existing record with the same code.
    async fn put(&self, record: Record) -> Result<(), AppError>;

    /// Writes a record only if no record holds its code yet.
    ///
    /// Returns `Ok(true)` when the record was inserted and `Ok(false)` when the
    /// code was already taken. The check and the write are a single atomic
    /// operation on the backend.
    async fn insert_if_absent(&self, record: Record) -> Result<bool, AppError>;

    /// Fetches a record by its short code.
    async fn get(&self, code: &str) -> Result<Option<Record>, AppError>;

    /// Atomically adds `delta` to the click counter of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record holds `code`.
    async fn increment_clicks(&self, code: &str, delta: u64) -> Result<(), AppError>;

    /// Round-trips to the backend to check it is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
