//! Location records and resolution results.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cache::{CacheEntry, timestamp_now};

/// A location-like object handed in by the caller.
///
/// Fields this crate does not know about are carried through untouched in
/// `extra`, so the caller gets back the same shape it sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Set only when a resolution happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocode_confidence: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocode_provider: Option<String>,
    /// RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocoded_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl LocationRecord {
    pub fn address(&self) -> Option<&str> {
        present(&self.address)
    }

    pub fn city(&self) -> Option<&str> {
        present(&self.city)
    }

    pub fn state(&self) -> Option<&str> {
        present(&self.state)
    }

    pub fn country(&self) -> Option<&str> {
        present(&self.country)
    }

    /// Non-blank address parts joined with `", "`, most specific first.
    pub fn full_address(&self) -> String {
        [self.address(), self.city(), self.state(), self.country()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Copy a resolution into this record and stamp it with the current time.
    pub fn apply(&mut self, result: &GeocodeResult) {
        self.latitude = Some(result.latitude);
        self.longitude = Some(result.longitude);
        self.geocode_confidence = Some(result.confidence);
        self.geocode_provider = Some(result.provider.clone());
        self.geocoded_at = Some(timestamp_now());
    }

    /// Drop resolution annotations left over from an earlier call.
    ///
    /// Coordinates are kept as supplied.
    pub fn clear_resolution(&mut self) {
        self.geocode_confidence = None;
        self.geocode_provider = None;
        self.geocoded_at = None;
    }
}

/// Which rung of the fallback ladder produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    Cache,
    Full,
    Simplified,
    CityCountry,
    Country,
}

/// A lower-ranked candidate returned next to the chosen one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Alternative {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
    pub confidence: u8,
}

/// Outcome of resolving one address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub confidence: u8,
    pub provider: String,
    pub tier: ResolutionTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// ISO 3166-1 alpha-2 as reported by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<Alternative>,
}

impl From<CacheEntry> for GeocodeResult {
    fn from(entry: CacheEntry) -> Self {
        Self {
            latitude: entry.latitude,
            longitude: entry.longitude,
            confidence: entry.confidence,
            provider: entry.provider,
            tier: ResolutionTier::Cache,
            display_name: None,
            city: entry.city,
            state: entry.state,
            country: entry.country_code,
            alternatives: Vec::new(),
        }
    }
}

/// One autocomplete candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Suggestion {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub confidence: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}
