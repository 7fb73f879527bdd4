//! geocode_locations tool implementation.
//!
//! Runs the batch coordinator over caller-supplied location records.

use locus_client::{BatchOptions, BatchSummary, Geocoder};
use locus_core::{AppConfig, Error, LocationRecord};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Upper bound on chunk size accepted from callers.
pub const MAX_CONCURRENT_LIMIT: usize = 16;

/// Input parameters for the geocode_locations tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GeocodeLocationsParams {
    /// Location records; unknown fields are returned untouched.
    pub locations: Vec<LocationRecord>,

    /// Minimum confidence (0-100) a match must exceed. Defaults to the server setting.
    #[serde(default)]
    pub min_confidence: Option<u8>,

    /// Records resolved concurrently per chunk (1-16). Defaults to the server setting.
    #[serde(default)]
    pub max_concurrent: Option<usize>,

    /// Leave records that already have coordinates alone.
    #[serde(default)]
    pub skip_resolved: bool,
}

/// Output structure for the geocode_locations tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GeocodeLocationsOutput {
    pub locations: Vec<LocationRecord>,
    pub summary: BatchSummary,
}

/// Implementation of the geocode_locations tool.
pub async fn locations_impl(
    geocoder: &Geocoder, config: &AppConfig, params: GeocodeLocationsParams,
) -> Result<CallToolResult, McpError> {
    if params.locations.is_empty() {
        return Err(Error::InvalidInput("locations cannot be empty".into()).into());
    }

    let min_confidence = params.min_confidence.unwrap_or(config.min_confidence);
    if min_confidence > 100 {
        return Err(Error::InvalidInput("min_confidence must be between 0 and 100".into()).into());
    }

    let max_concurrent = params.max_concurrent.unwrap_or(config.max_concurrent);
    if !(1..=MAX_CONCURRENT_LIMIT).contains(&max_concurrent) {
        return Err(Error::InvalidInput(format!("max_concurrent must be between 1 and {MAX_CONCURRENT_LIMIT}")).into());
    }

    let options = BatchOptions { min_confidence, max_concurrent, skip_resolved: params.skip_resolved };
    let report = geocoder.geocode_batch_report(params.locations, options).await;

    json_result(&GeocodeLocationsOutput { locations: report.locations, summary: report.summary })
}
