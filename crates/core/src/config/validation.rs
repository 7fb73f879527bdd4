//! Configuration validation rules.
//!
//! Checks `AppConfig` values after they have been loaded from environment,
//! files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.provider_base_url.starts_with("http://") || self.provider_base_url.starts_with("https://")) {
            return Err(invalid("provider_base_url", "must be an http(s) URL"));
        }

        if self.user_agent.trim().is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }

        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if !(1..=40).contains(&self.result_limit) {
            return Err(invalid("result_limit", "must be between 1 and 40"));
        }

        if self.min_confidence > 100 {
            return Err(invalid("min_confidence", "must not exceed 100"));
        }

        if !(1..=16).contains(&self.max_concurrent) {
            return Err(invalid("max_concurrent", "must be between 1 and 16"));
        }

        if self.call_delay_min_ms > self.call_delay_max_ms {
            return Err(invalid("call_delay_min_ms", "must not exceed call_delay_max_ms"));
        }

        if self.call_delay_max_ms < 1_000 {
            tracing::warn!(
                call_delay_max_ms = self.call_delay_max_ms,
                "provider calls paced faster than one per second per lane; public Nominatim may throttle"
            );
        }

        Ok(())
    }
}
