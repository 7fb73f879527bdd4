//! Nominatim search request types and validation.

use serde::Serialize;

use super::ProviderError;

/// Longest query accepted before it reaches the provider.
const MAX_QUERY_CHARS: usize = 400;

/// Query parameters for `GET /search`.
///
/// Always asks for `jsonv2` with address details expanded.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    /// Free-form query.
    pub q: String,

    /// Response format; fixed to `jsonv2`.
    pub format: &'static str,

    /// Include the structured `address` object (1) in each candidate.
    pub addressdetails: u8,

    /// Number of candidates (1-40).
    pub limit: u8,

    /// Contact address for the provider's operators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SearchRequest {
    pub fn new(q: impl Into<String>, limit: u8) -> Self {
        Self { q: q.into(), format: "jsonv2", addressdetails: 1, limit, email: None }
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    /// Validate the request parameters.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.q.trim().is_empty() {
            return Err(ProviderError::InvalidQuery("query cannot be empty".to_string()));
        }

        let chars = self.q.chars().count();
        if chars > MAX_QUERY_CHARS {
            return Err(ProviderError::InvalidQuery(format!(
                "query too long: {chars} chars (max {MAX_QUERY_CHARS})"
            )));
        }

        if !(1..=40).contains(&self.limit) {
            return Err(ProviderError::InvalidLimit);
        }

        Ok(())
    }
}
