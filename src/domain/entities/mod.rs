//! Core domain entities.
//!
//! - [`Record`] - A short code mapped to its long URL with a click counter
//! - [`ClickStats`] - Click statistics derived from a record

pub mod record;

pub use record::{ClickStats, Record};
