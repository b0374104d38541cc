//! Validation of submitted long URLs.
//!
//! URLs are checked but stored exactly as submitted, so a lookup returns the
//! same string the caller shortened.

use std::borrow::Cow;
use url::Url;
use validator::ValidationError;

/// Upper bound on accepted URL length, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a long URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL exceeds {MAX_URL_LENGTH} bytes")]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// Rejects relative references, `javascript:`, `data:`, `file:` and other
/// non-web schemes.
pub fn validate_long_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// [`validate_long_url`] as a `validator` field rule.
pub fn validate_long_url_field(input: &str) -> Result<(), ValidationError> {
    validate_long_url(input)
        .map_err(|e| ValidationError::new("url").with_message(Cow::Owned(e.to_string())))
}
