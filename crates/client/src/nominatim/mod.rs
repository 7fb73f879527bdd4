//! Nominatim search client.
//!
//! ### Contract
//!
//! - **Endpoint**: `GET {base}/search?q=..&format=jsonv2&addressdetails=1&limit=N`
//! - **Identification**: a non-empty `User-Agent` is mandatory; an optional
//!   contact `email` is appended when configured.
//! - **Errors**: 429 maps to [`ProviderError::RateLimited`], any other non-2xx
//!   to [`ProviderError::HttpError`]. Callers in the engine treat every error
//!   as "no candidates".
//! - **Pacing**: not done here. The engine delays before each call so that
//!   every concurrent lane throttles itself.

pub mod error;
pub mod request;
pub mod response;

pub use error::ProviderError;
pub use request::SearchRequest;
pub use response::{NominatimAddress, NominatimPlace};

use async_trait::async_trait;
use locus_core::AppConfig;
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

use crate::provider::{Candidate, GeocodeProvider};

/// Default base URL for the public Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "locus/0.1";

/// Name recorded as the provider of every result from this client.
pub const PROVIDER_NAME: &str = "nominatim";

/// Nominatim client configuration.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL (default: https://nominatim.openstreetmap.org).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: locus/0.x).
    pub user_agent: String,
    /// Optional `email` parameter.
    pub email: Option<String>,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            email: None,
        }
    }
}

impl From<&AppConfig> for NominatimConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.provider_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            email: config.contact_email.clone(),
        }
    }
}

/// Nominatim search client.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    config: NominatimConfig,
    search_url: Url,
}

impl NominatimClient {
    /// Create a client with its own HTTP connection pool.
    pub fn new(config: NominatimConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Network(Arc::new(e)))?;

        Self::with_http(http, config)
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, config: NominatimConfig) -> Result<Self, ProviderError> {
        if config.user_agent.trim().is_empty() {
            return Err(ProviderError::MissingUserAgent);
        }

        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let search_url = Url::parse(&base)
            .and_then(|base| base.join("search"))
            .map_err(|e| ProviderError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;

        Ok(Self { http, config, search_url })
    }

    /// Execute a search request.
    pub async fn search_places(&self, req: SearchRequest) -> Result<Vec<Candidate>, ProviderError> {
        req.validate()?;

        let start = Instant::now();
        tracing::debug!(query = %req.q, limit = req.limit, "searching nominatim");

        let http_response = self
            .http
            .get(self.search_url.clone())
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, &self.config.user_agent)
            .query(&req)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!(%status, "nominatim response status");

        if status == 429 {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            return Err(ProviderError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let places: Vec<NominatimPlace> =
            serde_json::from_slice(&bytes).map_err(|e| ProviderError::Parse(e.to_string()))?;

        let candidates = response::into_candidates(places);
        tracing::debug!(elapsed = ?start.elapsed(), count = candidates.len(), "nominatim search completed");

        Ok(candidates)
    }
}

#[async_trait]
impl GeocodeProvider for NominatimClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn search(&self, query: &str, limit: u8) -> Result<Vec<Candidate>, ProviderError> {
        let req = SearchRequest::new(query, limit).with_email(self.config.email.clone());
        self.search_places(req).await
    }
}
