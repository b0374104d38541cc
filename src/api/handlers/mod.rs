//! HTTP request handlers, one module per endpoint.

pub mod health;
pub mod lookup;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use health::health_handler;
pub use lookup::lookup_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use stats::stats_handler;
