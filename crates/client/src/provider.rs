//! Lookup provider abstraction.
//!
//! The engine talks to the outside world only through [`GeocodeProvider`],
//! so tests can script candidates without a network.

use async_trait::async_trait;

use crate::nominatim::ProviderError;

/// One place returned by a provider for a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub latitude: f64,
    pub longitude: f64,
    /// Human-readable label, e.g. "Baker Street, Marylebone, London, ...".
    pub display_name: String,
    /// Broad classification (`place`, `highway`, `building`, ...).
    pub category: Option<String>,
    /// Fine classification (`village`, `city`, `house`, ...).
    pub place_type: Option<String>,
    /// Administrative level the provider assigned to the match.
    pub address_type: Option<String>,
    /// Provider ranking weight, roughly 0..1.
    pub importance: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country_code: Option<String>,
    pub postcode: Option<String>,
}

impl Candidate {
    /// Whether the match is only a generic village-level place.
    pub fn is_village(&self) -> bool {
        [&self.place_type, &self.address_type]
            .into_iter()
            .any(|kind| kind.as_deref() == Some("village"))
    }
}

/// A query-in, candidates-out lookup service.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Short name stored alongside results, e.g. `"nominatim"`.
    fn name(&self) -> &str;

    /// Look up `query`, returning at most `limit` candidates in provider order.
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<Candidate>, ProviderError>;
}
