//! Resolution chain for a single address.
//!
//! The ladder, most trusted first:
//!
//! 1. blank check: nothing to resolve, no cache or provider traffic
//! 2. cache: a stored entry above the threshold is final
//! 3. full address: one provider call with the normalized text
//! 4. simplified address: unit/floor noise stripped, only if that changes the text
//! 5. city + country, at a lowered threshold and penalized
//! 6. country alone, only when there is no city, penalized harder
//!
//! Steps 1-4 make up [`Geocoder::resolve`]. Steps 5 and 6 run only from
//! [`Geocoder::resolve_location`], which the batch coordinator uses.
//!
//! A stored entry at or below the threshold is never deleted. It is only
//! replaced when a fresh lookup clears the threshold.

use locus_core::{
    Alternative, CacheEntry, GeocodeResult, LocationRecord, NormalizedQuery, ResolutionTier, normalize_address,
};

use super::Geocoder;
use super::simplify::simplify_address;
use crate::provider::Candidate;

pub const DEFAULT_MIN_CONFIDENCE: u8 = 30;

/// Lower-ranked candidates kept on a result.
pub const MAX_ALTERNATIVES: usize = 4;

/// A low-specificity rung of the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackTier {
    pub tier: ResolutionTier,
    /// Acceptance threshold used instead of the caller's.
    pub threshold: u8,
    /// Subtracted from the confidence of an accepted result.
    pub penalty: u8,
    /// The penalized confidence never drops below this.
    pub floor: u8,
}

impl FallbackTier {
    /// `max(floor, confidence - penalty)`.
    pub fn degrade(&self, confidence: u8) -> u8 {
        confidence.saturating_sub(self.penalty).max(self.floor)
    }

    fn apply(&self, mut result: GeocodeResult) -> GeocodeResult {
        result.confidence = self.degrade(result.confidence);
        result.tier = self.tier;
        result
    }
}

pub const CITY_TIER: FallbackTier =
    FallbackTier { tier: ResolutionTier::CityCountry, threshold: 25, penalty: 15, floor: 25 };

pub const COUNTRY_TIER: FallbackTier =
    FallbackTier { tier: ResolutionTier::Country, threshold: 20, penalty: 25, floor: 20 };

/// Outcome of one provider lookup.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lookup {
    Accepted(GeocodeResult),
    /// The provider answered but nothing cleared the threshold. Carries the
    /// best scored candidate, if there was one.
    Rejected(Option<GeocodeResult>),
    /// The provider call failed, or no call was made.
    Failed,
}

impl Geocoder {
    /// Resolve one free-text address: cache, full lookup, simplified lookup.
    ///
    /// Provider answers that clear `min_confidence` are written back to the
    /// cache under the hash of `address`.
    pub async fn resolve(&self, address: &str, min_confidence: u8) -> Option<GeocodeResult> {
        let query = Self::check_blank(address)?;
        self.resolve_query(&query, min_confidence).await.ok()
    }

    /// Resolve a record, falling back to city+country and then country.
    ///
    /// When a tier's query text is the same as the full address (no street
    /// part), the full lookup's answer is reused instead of asking the
    /// provider again. The record itself is not modified.
    pub async fn resolve_location(&self, record: &LocationRecord, min_confidence: u8) -> Option<GeocodeResult> {
        let query = Self::check_blank(&record.full_address())?;
        let full = match self.resolve_query(&query, min_confidence).await {
            Ok(found) => return Some(found),
            Err(full) => full,
        };

        let (tier, text) = match (record.city(), record.country()) {
            (Some(city), Some(country)) => (CITY_TIER, format!("{city}, {country}")),
            (None, Some(country)) => (COUNTRY_TIER, country.to_string()),
            _ => return None,
        };

        let found = match full {
            Lookup::Rejected(best) if normalize_address(&text) == query.normalized => {
                self.reuse_for_tier(&query, best, tier).await?
            }
            _ => self.resolve(&text, tier.threshold).await?,
        };
        Some(tier.apply(found))
    }

    /// Steps 2-4 for an already normalized query.
    ///
    /// On failure returns the outcome of the full-address lookup, or
    /// [`Lookup::Failed`] when the provider was never reached.
    pub(crate) async fn resolve_query(
        &self, query: &NormalizedQuery, min_confidence: u8,
    ) -> Result<GeocodeResult, Lookup> {
        if let Some(hit) = self.lookup_cache(query, min_confidence).await {
            return Ok(hit);
        }

        let found = match self.resolve_full(query, min_confidence).await {
            Lookup::Accepted(found) => found,
            full => match self.resolve_simplified(query, min_confidence).await {
                Lookup::Accepted(found) => found,
                _ => return Err(full),
            },
        };

        self.store(query, &found).await;
        Ok(found)
    }

    pub(crate) fn check_blank(address: &str) -> Option<NormalizedQuery> {
        let query = NormalizedQuery::new(address);
        if query.is_none() {
            tracing::debug!("blank address, nothing to resolve");
        }
        query
    }

    pub(crate) async fn lookup_cache(&self, query: &NormalizedQuery, min_confidence: u8) -> Option<GeocodeResult> {
        match self.cache.get(&query.hash).await {
            Ok(Some(entry)) if entry.confidence > min_confidence => {
                tracing::debug!(hash = %query.hash, confidence = entry.confidence, "geocode cache hit");
                Some(entry.into())
            }
            Ok(Some(entry)) => {
                tracing::debug!(
                    hash = %query.hash,
                    confidence = entry.confidence,
                    min_confidence,
                    "cached entry below threshold, looking up again"
                );
                None
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(hash = %query.hash, error = %err, "geocode cache read failed, treating as miss");
                None
            }
        }
    }

    pub(crate) async fn resolve_full(&self, query: &NormalizedQuery, min_confidence: u8) -> Lookup {
        self.lookup(&query.normalized, &query.original, min_confidence, ResolutionTier::Full)
            .await
    }

    pub(crate) async fn resolve_simplified(&self, query: &NormalizedQuery, min_confidence: u8) -> Lookup {
        let simplified = normalize_address(&simplify_address(&query.original));
        if simplified.is_empty() || simplified == query.normalized {
            return Lookup::Failed;
        }

        tracing::debug!(original = %query.normalized, simplified = %simplified, "retrying with simplified address");
        self.lookup(&simplified, &query.original, min_confidence, ResolutionTier::Simplified)
            .await
    }

    /// Judge a tier whose query was already sent as the full address.
    ///
    /// Only the cache and the earlier best candidate are consulted; the
    /// provider is not called again.
    async fn reuse_for_tier(
        &self, query: &NormalizedQuery, best: Option<GeocodeResult>, tier: FallbackTier,
    ) -> Option<GeocodeResult> {
        if let Some(hit) = self.lookup_cache(query, tier.threshold).await {
            return Some(hit);
        }

        let found = best.filter(|best| best.confidence > tier.threshold)?;
        tracing::debug!(
            query = %query.normalized,
            confidence = found.confidence,
            tier = ?tier.tier,
            "reusing full-address match for fallback tier"
        );
        self.store(query, &found).await;
        Some(found)
    }

    /// One paced provider call, scored against `original`.
    async fn lookup(&self, search: &str, original: &str, min_confidence: u8, tier: ResolutionTier) -> Lookup {
        self.pacing.before_call().await;

        let candidates = match self.provider.search(search, self.result_limit).await {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    query = %search,
                    error = %err,
                    "provider lookup failed, treating as no result"
                );
                return Lookup::Failed;
            }
        };

        let Some(result) = self.pick_best(candidates, original, tier) else {
            return Lookup::Rejected(None);
        };

        if result.confidence > min_confidence {
            tracing::debug!(query = %search, confidence = result.confidence, ?tier, "provider match accepted");
            Lookup::Accepted(result)
        } else {
            tracing::debug!(
                query = %search,
                confidence = result.confidence,
                min_confidence,
                "best provider match below threshold"
            );
            Lookup::Rejected(Some(result))
        }
    }

    /// Score every candidate and keep the best, with the runners-up as alternatives.
    ///
    /// Ties keep provider order.
    pub(crate) fn pick_best(
        &self, candidates: Vec<Candidate>, original: &str, tier: ResolutionTier,
    ) -> Option<GeocodeResult> {
        let mut scored: Vec<(u8, Candidate)> = candidates
            .into_iter()
            .map(|c| (self.weights.score(&c, original), c))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let mut ranked = scored.into_iter();
        let (confidence, best) = ranked.next()?;
        let alternatives = ranked
            .take(MAX_ALTERNATIVES)
            .map(|(confidence, c)| Alternative {
                latitude: c.latitude,
                longitude: c.longitude,
                display_name: c.display_name,
                confidence,
            })
            .collect();

        Some(GeocodeResult {
            latitude: best.latitude,
            longitude: best.longitude,
            confidence,
            provider: self.provider.name().to_string(),
            tier,
            display_name: Some(best.display_name),
            city: best.city,
            state: best.state,
            country: best.country_code,
            alternatives,
        })
    }

    /// Best-effort write-back. A failure is logged and the result still returned.
    async fn store(&self, query: &NormalizedQuery, result: &GeocodeResult) {
        let entry = CacheEntry {
            hash: query.hash.clone(),
            original_address: query.original.clone(),
            normalized_address: query.normalized.clone(),
            latitude: result.latitude,
            longitude: result.longitude,
            confidence: result.confidence,
            provider: result.provider.clone(),
            city: result.city.clone(),
            state: result.state.clone(),
            country_code: result.country.clone(),
            created_at: String::new(),
            updated_at: String::new(),
        };

        if let Err(err) = self.cache.upsert(&entry).await {
            tracing::warn!(hash = %query.hash, error = %err, "geocode cache write failed, result not cached");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use locus_core::{GeocodeCache, MemoryCache};

    use super::*;
    use crate::geocode::testing::{BrokenCache, ScriptedProvider, candidate};
    use crate::geocode::{Pacing, ScoringWeights};
    use crate::nominatim::ProviderError;

    fn geocoder(cache: Arc<dyn GeocodeCache>, provider: Arc<ScriptedProvider>) -> Geocoder {
        Geocoder::new(cache, provider).with_pacing(Pacing::none())
    }

    fn baker_street() -> Candidate {
        let mut c = candidate("Baker Street Station", 51.5226, -0.1571);
        c.importance = Some(0.2);
        c.city = Some("London".into());
        c.country_code = Some("gb".into());
        c
    }

    #[test]
    fn test_tier_constants() {
        assert_eq!((CITY_TIER.threshold, CITY_TIER.penalty, CITY_TIER.floor), (25, 15, 25));
        assert_eq!((COUNTRY_TIER.threshold, COUNTRY_TIER.penalty, COUNTRY_TIER.floor), (20, 25, 20));
    }

    #[test]
    fn test_degradation_is_monotonic() {
        for confidence in 0..=100u8 {
            let city = CITY_TIER.degrade(confidence);
            assert_eq!(city, confidence.saturating_sub(15).max(25));
            assert!(city >= 25);

            let country = COUNTRY_TIER.degrade(confidence);
            assert_eq!(country, confidence.saturating_sub(25).max(20));
            assert!(country >= 20);
            assert!(country <= city);
        }
        assert_eq!(CITY_TIER.degrade(60), 45);
        assert_eq!(COUNTRY_TIER.degrade(95), 70);
    }

    #[tokio::test]
    async fn test_blank_address_touches_nothing() {
        let cache = Arc::new(MemoryCache::new());
        let provider = Arc::new(ScriptedProvider::new());
        let geocoder = geocoder(cache.clone(), provider.clone());

        assert!(geocoder.resolve("", 30).await.is_none());
        assert!(geocoder.resolve("   \t ", 30).await.is_none());
        assert_eq!(provider.call_count(), 0);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_resolves_then_serves_from_cache() {
        let cache = Arc::new(MemoryCache::new());
        let provider =
            Arc::new(ScriptedProvider::new().answer("221b baker street, london", Ok(vec![baker_street()])));
        let geocoder = geocoder(cache.clone(), provider.clone());

        let first = geocoder.resolve("221B Baker Street, London", 30).await.unwrap();
        assert_eq!(first.confidence, 72);
        assert_eq!(first.tier, ResolutionTier::Full);
        assert_eq!(first.provider, "scripted");
        assert_eq!(provider.call_count(), 1);

        let hash = NormalizedQuery::new("221B Baker Street, London").unwrap().hash;
        let stored = cache.get(&hash).await.unwrap().unwrap();
        assert_eq!(stored.confidence, 72);
        assert_eq!(stored.original_address, "221B Baker Street, London");
        assert_eq!(stored.country_code.as_deref(), Some("gb"));

        let second = geocoder.resolve("221B Baker Street, London", 30).await.unwrap();
        assert_eq!(second.confidence, 72);
        assert_eq!(second.tier, ResolutionTier::Cache);
        assert_eq!((second.latitude, second.longitude), (first.latitude, first.longitude));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_low_confidence_cache_entry_is_kept_when_lookup_fails() {
        let cache = Arc::new(MemoryCache::new());
        let query = NormalizedQuery::new("Elm Court, Springfield").unwrap();
        let stale = CacheEntry {
            hash: query.hash.clone(),
            original_address: query.original.clone(),
            normalized_address: query.normalized.clone(),
            latitude: 1.0,
            longitude: 2.0,
            confidence: 20,
            provider: "scripted".into(),
            city: None,
            state: None,
            country_code: None,
            created_at: String::new(),
            updated_at: String::new(),
        };
        cache.upsert(&stale).await.unwrap();

        let provider = Arc::new(ScriptedProvider::new());
        let geocoder = geocoder(cache.clone(), provider.clone());

        assert!(geocoder.resolve("Elm Court, Springfield", 30).await.is_none());
        assert_eq!(provider.call_count(), 1);
        assert_eq!(cache.get(&query.hash).await.unwrap().unwrap().confidence, 20);
    }

    #[tokio::test]
    async fn test_low_confidence_cache_entry_is_upgraded() {
        let cache = Arc::new(MemoryCache::new());
        let query = NormalizedQuery::new("Oslo, Norway").unwrap();
        let stale = CacheEntry {
            hash: query.hash.clone(),
            original_address: query.original.clone(),
            normalized_address: query.normalized.clone(),
            latitude: 0.0,
            longitude: 0.0,
            confidence: 10,
            provider: "scripted".into(),
            city: None,
            state: None,
            country_code: None,
            created_at: String::new(),
            updated_at: String::new(),
        };
        cache.upsert(&stale).await.unwrap();

        let provider = Arc::new(
            ScriptedProvider::new().answer("oslo, norway", Ok(vec![candidate("Oslo, Norway", 59.91, 10.74)])),
        );
        let geocoder = geocoder(cache.clone(), provider.clone());

        let found = geocoder.resolve("Oslo, Norway", 30).await.unwrap();
        assert_eq!(found.confidence, 90);
        let stored = cache.get(&query.hash).await.unwrap().unwrap();
        assert_eq!(stored.confidence, 90);
        assert_eq!(stored.latitude, 59.91);
    }

    #[tokio::test]
    async fn test_simplified_retry() {
        let cache = Arc::new(MemoryCache::new());
        let provider = Arc::new(ScriptedProvider::new().answer(
            "12 high st, leeds",
            Ok(vec![candidate("12, High Street, Leeds, England", 53.79, -1.54)]),
        ));
        let geocoder = geocoder(cache.clone(), provider.clone());

        let found = geocoder.resolve("12 High St Suite 200, Leeds", 30).await.unwrap();
        assert_eq!(found.tier, ResolutionTier::Simplified);
        assert_eq!(provider.calls(), vec!["12 high st suite 200, leeds", "12 high st, leeds"]);

        let hash = NormalizedQuery::new("12 High St Suite 200, Leeds").unwrap().hash;
        assert!(cache.get(&hash).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_simplified_skipped_when_unchanged() {
        let provider = Arc::new(ScriptedProvider::new());
        let geocoder = geocoder(Arc::new(MemoryCache::new()), provider.clone());

        assert!(geocoder.resolve("Nowhere Special", 30).await.is_none());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_falls_through() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .answer("1 elm ave, apt 3", Err(ProviderError::HttpError { status: 503 }))
                .answer("1 elm ave", Ok(vec![candidate("1, Elm Avenue", 1.0, 2.0)])),
        );
        let geocoder = geocoder(Arc::new(MemoryCache::new()), provider.clone());

        let found = geocoder.resolve("1 Elm Ave, Apt 3", 30).await.unwrap();
        assert_eq!(found.tier, ResolutionTier::Simplified);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_broken_cache_does_not_fail_resolution() {
        let provider = Arc::new(
            ScriptedProvider::new().answer("berlin, germany", Ok(vec![candidate("Berlin, Germany", 52.52, 13.40)])),
        );
        let geocoder = geocoder(Arc::new(BrokenCache), provider.clone());

        let found = geocoder.resolve("Berlin, Germany", 30).await.unwrap();
        assert_eq!(found.latitude, 52.52);
        assert_eq!(found.confidence, 90);
    }

    #[tokio::test]
    async fn test_threshold_is_exclusive() {
        let provider =
            Arc::new(ScriptedProvider::new().answer("lisbon", Ok(vec![candidate("Porto, Portugal", 41.15, -8.61)])));
        let geocoder = geocoder(Arc::new(MemoryCache::new()), provider);

        // no token overlap scores exactly the base of 50
        assert!(geocoder.resolve("Lisbon", 50).await.is_none());
        assert_eq!(geocoder.resolve("Lisbon", 49).await.unwrap().confidence, 50);
    }

    #[tokio::test]
    async fn test_custom_weights() {
        let mut ruritania = candidate("Ruritania", 45.0, 15.0);
        ruritania.place_type = Some("village".into());
        let provider = Arc::new(ScriptedProvider::new().answer("faketown, ruritania", Ok(vec![ruritania])));

        let weights = ScoringWeights { village_penalty: 0.0, ..Default::default() };
        let geocoder = geocoder(Arc::new(MemoryCache::new()), provider).with_weights(weights);

        assert_eq!(geocoder.resolve("Faketown, Ruritania", 30).await.unwrap().confidence, 70);
    }

    #[tokio::test]
    async fn test_best_candidate_and_alternatives() {
        let mut village = candidate("Springfield", 10.0, 10.0);
        village.place_type = Some("village".into());
        let city = candidate("Springfield, Illinois, United States", 39.8, -89.6);
        let other = candidate("Shelbyville", 20.0, 20.0);

        let provider = Arc::new(
            ScriptedProvider::new().answer("springfield, illinois", Ok(vec![village, other, city])),
        );
        let geocoder = geocoder(Arc::new(MemoryCache::new()), provider);

        let found = geocoder.resolve("Springfield, Illinois", 30).await.unwrap();
        assert_eq!(found.latitude, 39.8);
        assert_eq!(found.confidence, 90);
        assert_eq!(found.alternatives.len(), 2);
        assert_eq!(found.alternatives[0].display_name, "Springfield");
        assert_eq!(found.alternatives[0].confidence, 60);
        assert_eq!(found.alternatives[1].confidence, 50);
    }

    #[tokio::test]
    async fn test_city_country_fallback() {
        let mut ruritania = candidate("Ruritania", 45.0, 15.0);
        ruritania.place_type = Some("village".into());

        let cache = Arc::new(MemoryCache::new());
        let provider = Arc::new(ScriptedProvider::new().answer("faketown, ruritania", Ok(vec![ruritania])));
        let geocoder = geocoder(cache.clone(), provider.clone());

        let record = LocationRecord {
            address: Some("99 Nowhere Ln, Apt 4".into()),
            city: Some("Faketown".into()),
            country: Some("Ruritania".into()),
            ..Default::default()
        };

        let found = geocoder.resolve_location(&record, 30).await.unwrap();
        assert_eq!(found.confidence, 45);
        assert_eq!(found.tier, ResolutionTier::CityCountry);
        assert_eq!(
            provider.calls(),
            vec![
                "99 nowhere ln, apt 4, faketown, ruritania",
                "99 nowhere ln, faketown, ruritania",
                "faketown, ruritania",
            ]
        );

        let city_hash = NormalizedQuery::new("Faketown, Ruritania").unwrap().hash;
        assert_eq!(cache.get(&city_hash).await.unwrap().unwrap().confidence, 60);
        let full_hash = NormalizedQuery::new(&record.full_address()).unwrap().hash;
        assert!(cache.get(&full_hash).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_no_country_attempt_when_city_present() {
        let provider = Arc::new(
            ScriptedProvider::new().answer("ruritania", Ok(vec![candidate("Ruritania", 45.0, 15.0)])),
        );
        let geocoder = geocoder(Arc::new(MemoryCache::new()), provider.clone());

        let record =
            LocationRecord { city: Some("Faketown".into()), country: Some("Ruritania".into()), ..Default::default() };

        assert!(geocoder.resolve_location(&record, 30).await.is_none());
        assert_eq!(provider.calls(), vec!["faketown, ruritania"]);
    }

    #[tokio::test]
    async fn test_city_country_record_reuses_full_lookup() {
        let mut ruritania = candidate("Ruritania", 45.0, 15.0);
        ruritania.place_type = Some("village".into());

        let cache = Arc::new(MemoryCache::new());
        let provider = Arc::new(ScriptedProvider::new().answer("faketown, ruritania", Ok(vec![ruritania])));
        let geocoder = geocoder(cache.clone(), provider.clone());

        let record =
            LocationRecord { city: Some("Faketown".into()), country: Some("Ruritania".into()), ..Default::default() };

        // 60 misses the caller's 65 but clears the city tier's 25
        let found = geocoder.resolve_location(&record, 65).await.unwrap();
        assert_eq!(found.confidence, 45);
        assert_eq!(found.tier, ResolutionTier::CityCountry);
        assert_eq!(provider.call_count(), 1);

        let hash = NormalizedQuery::new("Faketown, Ruritania").unwrap().hash;
        assert_eq!(cache.get(&hash).await.unwrap().unwrap().confidence, 60);
    }

    #[tokio::test]
    async fn test_country_only_record_queries_once() {
        let provider = Arc::new(ScriptedProvider::new());
        let geocoder = geocoder(Arc::new(MemoryCache::new()), provider.clone());

        let record = LocationRecord { country: Some("Ruritania".into()), ..Default::default() };

        assert!(geocoder.resolve_location(&record, 30).await.is_none());
        assert_eq!(provider.calls(), vec!["ruritania"]);
    }

    #[tokio::test]
    async fn test_tier_reuse_consults_cache_at_tier_threshold() {
        let cache = Arc::new(MemoryCache::new());
        let query = NormalizedQuery::new("Ruritania").unwrap();
        let entry = CacheEntry {
            hash: query.hash.clone(),
            original_address: query.original.clone(),
            normalized_address: query.normalized.clone(),
            latitude: 45.0,
            longitude: 15.0,
            confidence: 28,
            provider: "scripted".into(),
            city: None,
            state: None,
            country_code: None,
            created_at: String::new(),
            updated_at: String::new(),
        };
        cache.upsert(&entry).await.unwrap();

        let provider = Arc::new(ScriptedProvider::new());
        let geocoder = geocoder(cache, provider.clone());

        let record = LocationRecord { country: Some("Ruritania".into()), ..Default::default() };
        let found = geocoder.resolve_location(&record, 30).await.unwrap();

        assert_eq!(found.confidence, 20);
        assert_eq!(found.tier, ResolutionTier::Country);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_country_retried_after_provider_error() {
        let mut ruritania = candidate("Ruritania", 45.0, 15.0);
        ruritania.importance = Some(0.5);

        let provider = Arc::new(
            ScriptedProvider::new()
                .answer("ruritania", Err(ProviderError::Timeout))
                .answer("ruritania", Ok(vec![ruritania])),
        );
        let geocoder = geocoder(Arc::new(MemoryCache::new()), provider.clone());

        let record = LocationRecord { country: Some("Ruritania".into()), ..Default::default() };
        let found = geocoder.resolve_location(&record, 30).await.unwrap();

        assert_eq!(found.confidence, 70);
        assert_eq!(found.tier, ResolutionTier::Country);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_returns_none() {
        let provider = Arc::new(ScriptedProvider::new());
        let geocoder = geocoder(Arc::new(MemoryCache::new()), provider.clone());

        let record = LocationRecord { address: Some("Nowhere".into()), ..Default::default() };
        assert!(geocoder.resolve_location(&record, 30).await.is_none());
        assert_eq!(provider.call_count(), 1);
    }
}
