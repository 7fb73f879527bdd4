//! Autocomplete over the provider. Uncached, unpaced and without fallbacks.

use locus_core::Suggestion;

use super::Geocoder;

/// Shorter queries return nothing without calling the provider.
pub const MIN_SUGGEST_CHARS: usize = 3;
pub const MAX_SUGGESTIONS: usize = 20;

impl Geocoder {
    /// Ranked candidates for a partial query, best first.
    ///
    /// Provider failures yield an empty list.
    pub async fn suggest(&self, partial: &str, limit: usize) -> Vec<Suggestion> {
        let partial = partial.trim();
        if partial.chars().count() < MIN_SUGGEST_CHARS {
            return Vec::new();
        }

        let limit = limit.clamp(1, MAX_SUGGESTIONS);
        let candidates = match self.provider.search(partial, limit as u8).await {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    query = %partial,
                    error = %err,
                    "suggestion lookup failed"
                );
                return Vec::new();
            }
        };

        let mut suggestions: Vec<Suggestion> = candidates
            .into_iter()
            .map(|c| Suggestion {
                confidence: self.weights.score(&c, partial),
                display_name: c.display_name,
                latitude: c.latitude,
                longitude: c.longitude,
                city: c.city,
                state: c.state,
                country_code: c.country_code,
            })
            .collect();

        suggestions.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        suggestions.truncate(limit);
        suggestions
    }
}
