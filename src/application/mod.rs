//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::RecordStore`] trait
//! and expose the operations HTTP handlers and the admin CLI call.
//!
//! - [`services::ShortenerService`] - Shorten, redirect, lookup and stats
pub mod services;
