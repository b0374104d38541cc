#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use url_shortener::application::services::{ClickFailurePolicy, ShortenerService};
use url_shortener::domain::entities::Record;
use url_shortener::domain::repositories::RecordStore;
use url_shortener::error::AppError;
use url_shortener::infrastructure::store::MemoryRecordStore;
use url_shortener::state::AppState;
use url_shortener::utils::code_generator::{CodeGenerator, generate_code};

pub const BASE_URL: &str = "http://testserver";

/// Hands out queued codes first, then random ones.
#[derive(Default)]
pub struct SequenceCodeGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl SequenceCodeGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
        }
    }
}

impl CodeGenerator for SequenceCodeGenerator {
    fn generate(&self) -> String {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(generate_code)
    }
}

/// Store whose every call fails as unreachable.
pub struct UnavailableStore;

#[async_trait]
impl RecordStore for UnavailableStore {
    async fn put(&self, _record: Record) -> Result<(), AppError> {
        Err(unavailable())
    }

    async fn insert_if_absent(&self, _record: Record) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn get(&self, _code: &str) -> Result<Option<Record>, AppError> {
        Err(unavailable())
    }

    async fn increment_clicks(&self, _code: &str, _delta: u64) -> Result<(), AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}

/// Memory store whose increments fail while reads keep working.
#[derive(Default)]
pub struct BrokenCounterStore {
    inner: MemoryRecordStore,
}

#[async_trait]
impl RecordStore for BrokenCounterStore {
    async fn put(&self, record: Record) -> Result<(), AppError> {
        self.inner.put(record).await
    }

    async fn insert_if_absent(&self, record: Record) -> Result<bool, AppError> {
        self.inner.insert_if_absent(record).await
    }

    async fn get(&self, code: &str) -> Result<Option<Record>, AppError> {
        self.inner.get(code).await
    }

    async fn increment_clicks(&self, _code: &str, _delta: u64) -> Result<(), AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.inner.ping().await
    }
}

fn unavailable() -> AppError {
    AppError::store_unavailable("Store unreachable", json!({ "reason": "test" }))
}

pub fn create_test_state(store: Arc<dyn RecordStore>, codes: &[&str]) -> AppState {
    AppState::new(ShortenerService::new(
        store,
        Arc::new(SequenceCodeGenerator::new(codes)),
        BASE_URL,
    ))
}

pub fn create_test_state_with_policy(
    store: Arc<dyn RecordStore>,
    policy: ClickFailurePolicy,
) -> AppState {
    AppState::new(
        ShortenerService::new(
            store,
            Arc::new(SequenceCodeGenerator::default()),
            BASE_URL,
        )
        .with_click_failure_policy(policy),
    )
}

/// Memory store plus state over it, so tests can inspect stored records.
pub fn create_memory_state(codes: &[&str]) -> (AppState, Arc<MemoryRecordStore>) {
    let store = Arc::new(MemoryRecordStore::new());
    (create_test_state(store.clone(), codes), store)
}

pub async fn create_test_record(store: &dyn RecordStore, code: &str, url: &str, clicks: u64) {
    store
        .put(Record::new(code, url).with_clicks(clicks))
        .await
        .unwrap();
}
