//! Address resolution engine.
//!
//! [`Geocoder`] ties the content cache to a lookup provider:
//!
//! - `chain`: cache lookup, full-address lookup, simplified retry and the
//!   city/country fallback tiers for one address
//! - `batch`: many records in fixed-size concurrent chunks with pauses
//!   between chunks
//! - `suggest`: uncached autocomplete over the provider
//!
//! Provider and cache failures are logged and swallowed; the worst outcome
//! for any input is "unresolved".

pub mod batch;
pub mod chain;
pub mod pacing;
pub mod score;
pub mod simplify;
pub mod suggest;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use locus_core::{AppConfig, CacheEntry, CacheStats, Error, GeocodeCache};

use crate::provider::GeocodeProvider;

pub use batch::{BatchOptions, BatchReport, BatchSummary};
pub use chain::{CITY_TIER, COUNTRY_TIER, DEFAULT_MIN_CONFIDENCE, FallbackTier};
pub use pacing::Pacing;
pub use score::ScoringWeights;
pub use simplify::simplify_address;

/// Candidates requested per provider call unless configured otherwise.
pub const DEFAULT_RESULT_LIMIT: u8 = 5;

/// The geocoding engine. Cheap to clone; clones share cache and provider.
#[derive(Clone)]
pub struct Geocoder {
    cache: Arc<dyn GeocodeCache>,
    provider: Arc<dyn GeocodeProvider>,
    pacing: Pacing,
    weights: ScoringWeights,
    result_limit: u8,
}

impl Geocoder {
    pub fn new(cache: Arc<dyn GeocodeCache>, provider: Arc<dyn GeocodeProvider>) -> Self {
        Self {
            cache,
            provider,
            pacing: Pacing::default(),
            weights: ScoringWeights::default(),
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }

    /// Build with pacing and result limit taken from `config`.
    pub fn from_config(
        cache: Arc<dyn GeocodeCache>, provider: Arc<dyn GeocodeProvider>, config: &AppConfig,
    ) -> Self {
        Self::new(cache, provider)
            .with_pacing(Pacing::from(config))
            .with_result_limit(config.result_limit)
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_result_limit(mut self, limit: u8) -> Self {
        self.result_limit = limit.max(1);
        self
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Cache counters, for operational visibility.
    pub async fn cache_stats(&self) -> Result<CacheStats, Error> {
        self.cache.stats().await
    }

    /// Raw cache row for `hash`.
    pub async fn cache_entry(&self, hash: &str) -> Result<Option<CacheEntry>, Error> {
        self.cache.get(hash).await
    }
}
