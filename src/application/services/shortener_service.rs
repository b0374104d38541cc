//! Short link creation, resolution and click statistics.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::entities::{ClickStats, Record};
use crate::domain::repositories::RecordStore;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_validator::validate_long_url;
use serde_json::json;
use tracing::{debug, info, warn};

/// Upper bound on conditional-insert attempts for one shorten request.
///
/// Each attempt collides with probability at most `n / 62^8` for `n` stored
/// records, so reaching the bound means something other than bad luck.
pub const MAX_CODE_ATTEMPTS: usize = 16;

/// What a redirect does when the click increment fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickFailurePolicy {
    /// The increment error fails the redirect request.
    #[default]
    Propagate,
    /// The error is logged and the redirect still succeeds.
    Ignore,
}

impl FromStr for ClickFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "propagate" => Ok(Self::Propagate),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!(
                "unknown click failure policy '{other}' (expected 'propagate' or 'ignore')"
            )),
        }
    }
}

impl fmt::Display for ClickFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Propagate => f.write_str("propagate"),
            Self::Ignore => f.write_str("ignore"),
        }
    }
}

/// Service behind every HTTP endpoint.
///
/// Holds the injected record store and code generator; one instance is built
/// at startup and shared through [`crate::state::AppState`].
pub struct ShortenerService {
    store: Arc<dyn RecordStore>,
    generator: Arc<dyn CodeGenerator>,
    base_url: String,
    click_failure_policy: ClickFailurePolicy,
}

impl ShortenerService {
    /// Creates a service that builds short URLs under `base_url`.
    pub fn new(
        store: Arc<dyn RecordStore>,
        generator: Arc<dyn CodeGenerator>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            generator,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            click_failure_policy: ClickFailurePolicy::default(),
        }
    }

    pub fn with_click_failure_policy(mut self, policy: ClickFailurePolicy) -> Self {
        self.click_failure_policy = policy;
        self
    }

    /// Creates a record for `long_url` under a freshly generated code.
    ///
    /// The URL is validated before the store is touched. Candidate codes are
    /// written with [`RecordStore::insert_if_absent`], so two concurrent
    /// requests can never overwrite each other's record; a taken code just
    /// triggers another candidate.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL is not an absolute HTTP(S) URL
    /// - [`AppError::Internal`] if [`MAX_CODE_ATTEMPTS`] candidates all collide
    /// - Store errors are propagated
    pub async fn shorten(&self, long_url: &str) -> Result<Record, AppError> {
        validate_long_url(long_url).map_err(|e| AppError::invalid_field("longUrl", e.to_string()))?;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let record = Record::new(self.generator.generate(), long_url);

            if self.store.insert_if_absent(record.clone()).await? {
                info!(code = %record.short_code, attempt, "Created short link");
                return Ok(record);
            }

            debug!(code = %record.short_code, attempt, "Short code collision, retrying");
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Resolves `code` for a redirect and counts the click.
    ///
    /// The click is added with the store's atomic increment. A failed
    /// increment is handled according to the configured
    /// [`ClickFailurePolicy`].
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code does not exist
    /// - Increment errors under [`ClickFailurePolicy::Propagate`]
    pub async fn resolve_and_count(&self, code: &str) -> Result<String, AppError> {
        let record = self.lookup(code).await?;

        if let Err(e) = self.store.increment_clicks(code, 1).await {
            match self.click_failure_policy {
                ClickFailurePolicy::Propagate => return Err(e),
                ClickFailurePolicy::Ignore => {
                    warn!(code, error = %e, "Failed to record click, redirecting anyway");
                }
            }
        }

        Ok(record.long_url)
    }

    /// Returns the record stored under `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    pub async fn lookup(&self, code: &str) -> Result<Record, AppError> {
        self.store
            .get(code)
            .await?
            .ok_or_else(|| AppError::code_not_found(code))
    }

    /// Returns click statistics for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    pub async fn stats(&self, code: &str) -> Result<ClickStats, AppError> {
        Ok(self.lookup(code).await?.stats())
    }

    /// Checks that the record store is reachable.
    pub async fn health(&self) -> Result<(), AppError> {
        self.store.ping().await
    }

    /// Composes the public short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    pub fn click_failure_policy(&self) -> ClickFailurePolicy {
        self.click_failure_policy
    }
}
