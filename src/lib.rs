//! # URL Shortener
//!
//! A small URL shortening service built with Axum over a pluggable record store.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - The stored record and the store contract
//! - **Application Layer** ([`application`]) - Shortening, resolving and click counting
//! - **Infrastructure Layer** ([`infrastructure`]) - Memory, PostgreSQL and Redis stores
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Endpoints
//!
//! - `POST /url` - Shorten a long URL
//! - `GET /{code}` - Redirect to the long URL and count the click
//! - `GET /url/{code}` - Return the long URL without counting
//! - `GET /stats/{code}` - Click statistics
//! - `GET /health` - Store connectivity
//!
//! ## Quick Start
//!
//! ```bash
//! # In-memory store, nothing else required
//! cargo run
//!
//! # Redis-backed
//! STORE_BACKEND=redis REDIS_URL="redis://localhost:6379" cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{ClickFailurePolicy, ShortenerService};
    pub use crate::domain::entities::{ClickStats, Record};
    pub use crate::domain::repositories::RecordStore;
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::MemoryRecordStore;
    pub use crate::state::AppState;
}
