//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::ShortenerService;

/// State shared by all handlers through axum's `State` extractor.
///
/// Built once at startup by [`crate::server::run`]; cloning only bumps the
/// reference count.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
}

impl AppState {
    pub fn new(shortener: ShortenerService) -> Self {
        Self {
            shortener: Arc::new(shortener),
        }
    }
}
