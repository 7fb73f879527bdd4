//! geocode_suggest tool implementation.

use locus_client::Geocoder;
use locus_client::geocode::suggest::MAX_SUGGESTIONS;
use locus_core::{Error, Suggestion};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for the geocode_suggest tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GeocodeSuggestParams {
    /// Partial address; fewer than 3 characters returns nothing.
    pub query: String,

    /// Number of suggestions (1-20, default 5).
    #[serde(default)]
    pub limit: Option<usize>,
}

fn default_limit() -> usize {
    5
}

/// Output structure for the geocode_suggest tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GeocodeSuggestOutput {
    /// Ranked best first.
    pub suggestions: Vec<Suggestion>,
}

/// Implementation of the geocode_suggest tool.
pub async fn suggest_impl(geocoder: &Geocoder, params: GeocodeSuggestParams) -> Result<CallToolResult, McpError> {
    let limit = params.limit.unwrap_or_else(default_limit);
    if !(1..=MAX_SUGGESTIONS).contains(&limit) {
        return Err(Error::InvalidInput(format!("limit must be between 1 and {MAX_SUGGESTIONS}")).into());
    }

    let suggestions = geocoder.suggest(&params.query, limit).await;
    json_result(&GeocodeSuggestOutput { suggestions })
}
