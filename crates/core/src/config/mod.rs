//! Application configuration with layered loading.
//!
//! Configuration is loaded with figment from, highest precedence first:
//!
//! 1. Environment variables (LOCUS_*)
//! 2. TOML config file (if LOCUS_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to SQLite geocode cache.
    ///
    /// Set via LOCUS_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Base URL of the Nominatim-compatible lookup service.
    ///
    /// Set via LOCUS_PROVIDER_BASE_URL environment variable.
    #[serde(default = "default_provider_base_url")]
    pub provider_base_url: String,

    /// User-Agent sent to the provider. Public Nominatim rejects requests without one.
    ///
    /// Set via LOCUS_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Contact address passed as the `email` parameter.
    ///
    /// Set via LOCUS_CONTACT_EMAIL environment variable.
    #[serde(default)]
    pub contact_email: Option<String>,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via LOCUS_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Candidates requested per lookup.
    #[serde(default = "default_result_limit")]
    pub result_limit: u8,

    /// Results at or below this confidence are rejected.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: u8,

    /// Batch chunk size, and so the number of concurrent provider lanes.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Lower bound of the jittered pause before each provider call.
    #[serde(default = "default_call_delay_min_ms")]
    pub call_delay_min_ms: u64,

    /// Upper bound of the jittered pause before each provider call.
    #[serde(default = "default_call_delay_max_ms")]
    pub call_delay_max_ms: u64,

    /// Pause between batch chunks.
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./locus-geocode.sqlite")
}

fn default_provider_base_url() -> String {
    "https://nominatim.openstreetmap.org".into()
}

fn default_user_agent() -> String {
    "locus/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_result_limit() -> u8 {
    5
}

fn default_min_confidence() -> u8 {
    30
}

fn default_max_concurrent() -> usize {
    3
}

fn default_call_delay_min_ms() -> u64 {
    1_000
}

fn default_call_delay_max_ms() -> u64 {
    1_500
}

fn default_chunk_delay_ms() -> u64 {
    2_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            provider_base_url: default_provider_base_url(),
            user_agent: default_user_agent(),
            contact_email: None,
            timeout_ms: default_timeout_ms(),
            result_limit: default_result_limit(),
            min_confidence: default_min_confidence(),
            max_concurrent: default_max_concurrent(),
            call_delay_min_ms: default_call_delay_min_ms(),
            call_delay_max_ms: default_call_delay_max_ms(),
            chunk_delay_ms: default_chunk_delay_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn call_delay(&self) -> (Duration, Duration) {
        (Duration::from_millis(self.call_delay_min_ms), Duration::from_millis(self.call_delay_max_ms))
    }

    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("LOCUS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("LOCUS_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
