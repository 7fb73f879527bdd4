//! Provider client error types.

use std::sync::Arc;

/// Errors from the lookup provider client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// No User-Agent configured.
    #[error("missing user agent: the provider requires an identifying User-Agent")]
    MissingUserAgent,

    /// Invalid base URL.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    /// Invalid search query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid limit parameter (must be 1-40).
    #[error("invalid limit: must be 1-40")]
    InvalidLimit,

    /// Rate limited by the provider.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ProviderError::Timeout } else { ProviderError::Network(Arc::new(err)) }
    }
}
