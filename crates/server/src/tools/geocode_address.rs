//! geocode_address tool implementation.
//!
//! Resolves one free-text address through the cache, full and simplified
//! lookups. City and country fallbacks only apply to location records.

use locus_client::Geocoder;
use locus_core::{AppConfig, Error, GeocodeResult};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for the geocode_address tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GeocodeAddressParams {
    /// Free-text address.
    pub address: String,

    /// Minimum confidence (0-100) a match must exceed. Defaults to the server setting.
    #[serde(default)]
    pub min_confidence: Option<u8>,
}

/// Output structure for the geocode_address tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GeocodeAddressOutput {
    /// Best match, or null when nothing cleared the threshold.
    pub result: Option<GeocodeResult>,
}

/// Implementation of the geocode_address tool.
pub async fn address_impl(
    geocoder: &Geocoder, config: &AppConfig, params: GeocodeAddressParams,
) -> Result<CallToolResult, McpError> {
    let min_confidence = params.min_confidence.unwrap_or(config.min_confidence);
    if min_confidence > 100 {
        return Err(Error::InvalidInput("min_confidence must be between 0 and 100".into()).into());
    }

    let result = geocoder.resolve(&params.address, min_confidence).await;
    json_result(&GeocodeAddressOutput { result })
}
