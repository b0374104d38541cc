//! In-memory record store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::Record;
use crate::domain::repositories::RecordStore;
use crate::error::AppError;

/// Record store kept entirely in process memory.
///
/// Nothing survives a restart. Conditional inserts and click increments run
/// under the write lock, which makes them atomic with respect to each other.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, Record>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        debug!("Using in-memory record store");
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put(&self, record: Record) -> Result<(), AppError> {
        self.records
            .write()
            .await
            .insert(record.short_code.clone(), record);
        Ok(())
    }

    async fn insert_if_absent(&self, record: Record) -> Result<bool, AppError> {
        let mut records = self.records.write().await;
        match records.entry(record.short_code.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(true)
            }
        }
    }

    async fn get(&self, code: &str) -> Result<Option<Record>, AppError> {
        Ok(self.records.read().await.get(code).cloned())
    }

    async fn increment_clicks(&self, code: &str, delta: u64) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(code)
            .ok_or_else(|| AppError::code_not_found(code))?;
        record.clicks = record.clicks.saturating_add(delta);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_put_and_get() {
        let store = MemoryRecordStore::new();
        store
            .put(Record::new("abc12345", "https://example.com"))
            .await
            .unwrap();

        let record = store.get("abc12345").await.unwrap().unwrap();
        assert_eq!(record.long_url, "https://example.com");
        assert!(store.get("missing0").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryRecordStore::new();
        store.put(Record::new("abc12345", "https://a.com")).await.unwrap();
        store.put(Record::new("abc12345", "https://b.com")).await.unwrap();

        let record = store.get("abc12345").await.unwrap().unwrap();
        assert_eq!(record.long_url, "https://b.com");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_if_absent_keeps_existing() {
        let store = MemoryRecordStore::new();

        assert!(store
            .insert_if_absent(Record::new("abc12345", "https://first.com"))
            .await
            .unwrap());
        assert!(!store
            .insert_if_absent(Record::new("abc12345", "https://second.com"))
            .await
            .unwrap());

        let record = store.get("abc12345").await.unwrap().unwrap();
        assert_eq!(record.long_url, "https://first.com");
    }

    #[tokio::test]
    async fn test_concurrent_conditional_inserts_have_one_winner() {
        let store = Arc::new(MemoryRecordStore::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert_if_absent(Record::new("abc12345", format!("https://{i}.com")))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn test_increment_clicks() {
        let store = MemoryRecordStore::new();
        store.put(Record::new("abc12345", "https://example.com")).await.unwrap();

        store.increment_clicks("abc12345", 1).await.unwrap();
        store.increment_clicks("abc12345", 2).await.unwrap();

        assert_eq!(store.get("abc12345").await.unwrap().unwrap().clicks, 3);
    }

    #[tokio::test]
    async fn test_increment_missing_is_not_found() {
        let store = MemoryRecordStore::new();
        let result = store.increment_clicks("missing0", 1).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
        assert!(store.is_empty().await);
    }
}
