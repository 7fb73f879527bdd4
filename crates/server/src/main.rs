//! locus-mcp server entry point.
//!
//! Boots the geocoding MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use locus_client::{Geocoder, NominatimClient, NominatimConfig};
use locus_core::{AppConfig, CacheDb};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        db_path = %config.db_path.display(),
        provider = %config.provider_base_url,
        max_concurrent = config.max_concurrent,
        "Starting locus-mcp server on stdio transport"
    );

    let db = CacheDb::open(&config.db_path).await?;
    let provider = NominatimClient::new(NominatimConfig::from(&config))?;
    let geocoder = Geocoder::from_config(Arc::new(db), Arc::new(provider), &config);
    tracing::info!(
        provider = geocoder.provider_name(),
        call_delay_min_ms = geocoder.pacing().call_delay_min.as_millis() as u64,
        call_delay_max_ms = geocoder.pacing().call_delay_max.as_millis() as u64,
        chunk_delay_ms = geocoder.pacing().chunk_delay.as_millis() as u64,
        "geocoder ready"
    );

    let handler = handler::LocusServer::new(geocoder, config);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
