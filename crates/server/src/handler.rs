//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.

use std::sync::Arc;

use locus_client::Geocoder;
use locus_core::AppConfig;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

use crate::tools::cache::{CacheGetParams, get_impl, stats_impl};
use crate::tools::geocode_address::{GeocodeAddressParams, address_impl};
use crate::tools::geocode_locations::{GeocodeLocationsParams, locations_impl};
use crate::tools::geocode_suggest::{GeocodeSuggestParams, suggest_impl};

/// The main MCP server handler for locus.
#[derive(Clone)]
pub struct LocusServer {
    tool_router: ToolRouter<Self>,
    geocoder: Geocoder,
    config: Arc<AppConfig>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl LocusServer {
    pub fn new(geocoder: Geocoder, config: AppConfig) -> Self {
        Self { tool_router: Self::tool_router(), geocoder, config: Arc::new(config) }
    }

    /// Resolve a list of location records to coordinates.
    ///
    /// Records come back in the order given, annotated where a match was found.
    #[tool(
        description = "Geocode a list of location records (address, city, state, country). Returns the records annotated with latitude, longitude, confidence, provider and timestamp, plus a summary."
    )]
    async fn geocode_locations(&self, params: Parameters<GeocodeLocationsParams>) -> Result<CallToolResult, McpError> {
        locations_impl(&self.geocoder, &self.config, params.0).await
    }

    #[tool(
        description = "Geocode a single free-text address. Uses the cache, then the full and simplified address. Returns the best match or null."
    )]
    async fn geocode_address(&self, params: Parameters<GeocodeAddressParams>) -> Result<CallToolResult, McpError> {
        address_impl(&self.geocoder, &self.config, params.0).await
    }

    #[tool(description = "Autocomplete a partial address (at least 3 characters). Returns ranked suggestions. Not cached.")]
    async fn geocode_suggest(&self, params: Parameters<GeocodeSuggestParams>) -> Result<CallToolResult, McpError> {
        suggest_impl(&self.geocoder, params.0).await
    }

    #[tool(description = "Show geocode cache statistics: entry count, entries with coordinates, average confidence.")]
    async fn geocode_cache_stats(&self) -> Result<CallToolResult, McpError> {
        stats_impl(&self.geocoder).await
    }

    #[tool(description = "Fetch one geocode cache entry by its 64-character hex hash.")]
    async fn geocode_cache_get(&self, params: Parameters<CacheGetParams>) -> Result<CallToolResult, McpError> {
        get_impl(&self.geocoder, params.0).await
    }
}

impl ServerHandler for LocusServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "locus-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
