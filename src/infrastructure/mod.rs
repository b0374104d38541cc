//! Infrastructure layer for external integrations.
//!
//! Implements the domain's [`crate::domain::repositories::RecordStore`]
//! contract against concrete backends.
//!
//! - [`store`] - Memory, PostgreSQL and Redis record stores

pub mod store;
