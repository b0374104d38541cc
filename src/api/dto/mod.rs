//! Data Transfer Objects for API requests and responses.
//!
//! Field names are camelCase on the wire (`longUrl`, `shortUrl`,
//! `lastClicked`).

pub mod health;
pub mod lookup;
pub mod shorten;
pub mod stats;
