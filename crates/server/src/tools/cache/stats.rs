//! geocode_cache_stats tool implementation.

use locus_client::Geocoder;
use rmcp::{ErrorData as McpError, model::CallToolResult};

use crate::tools::json_result;

/// Implementation of the geocode_cache_stats tool.
pub async fn stats_impl(geocoder: &Geocoder) -> Result<CallToolResult, McpError> {
    let stats = geocoder.cache_stats().await?;
    json_result(&stats)
}
