//! Domain layer: entities and the storage contract.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - The [`repositories::RecordStore`] trait
//!
//! The domain layer has no dependency on infrastructure or HTTP code.

pub mod entities;
pub mod repositories;
