//! Test doubles shared by the tool tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use locus_client::{Candidate, GeocodeProvider, Geocoder, Pacing, ProviderError};
use locus_core::GeocodeCache;
use rmcp::model::CallToolResult;

/// Provider that answers every query with the same candidates.
#[derive(Default)]
pub(crate) struct FixedProvider {
    candidates: Vec<Candidate>,
    calls: AtomicUsize,
}

impl FixedProvider {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn with(candidates: Vec<Candidate>) -> Self {
        Self { candidates, calls: AtomicUsize::new(0) }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodeProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn search(&self, _query: &str, limit: u8) -> Result<Vec<Candidate>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.candidates.iter().take(limit as usize).cloned().collect())
    }
}

pub(crate) fn oslo() -> Candidate {
    Candidate {
        display_name: "Oslo, Norway".into(),
        latitude: 59.91,
        longitude: 10.74,
        country_code: Some("no".into()),
        ..Default::default()
    }
}

pub(crate) fn geocoder(cache: Arc<dyn GeocodeCache>, provider: Arc<FixedProvider>) -> Geocoder {
    Geocoder::new(cache, provider).with_pacing(Pacing::none())
}

/// The JSON payload of a successful tool call.
pub(crate) fn output_json(result: &CallToolResult) -> serde_json::Value {
    let text = result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
        .unwrap();
    serde_json::from_str(&text).unwrap()
}
