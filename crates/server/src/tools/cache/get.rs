//! geocode_cache_get tool implementation.
//!
//! Retrieves a cached geocode entry by hash.

use locus_client::Geocoder;
use locus_core::cache::hash::is_valid_key;
use locus_core::{CacheEntry, Error};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::json_result;

/// Parameters for the geocode_cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// SHA-256 of the normalized address, as 64 hex characters.
    pub hash: String,
}

/// Output from the geocode_cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    pub entry: CacheEntry,
}

/// Implementation of the geocode_cache_get tool.
pub async fn get_impl(geocoder: &Geocoder, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    if !is_valid_key(&params.hash) {
        return Err(Error::InvalidHash.into());
    }

    let entry = geocoder
        .cache_entry(&params.hash)
        .await?
        .ok_or_else(|| Error::CacheMiss(params.hash.clone()))?;

    json_result(&CacheGetOutput { entry })
}
