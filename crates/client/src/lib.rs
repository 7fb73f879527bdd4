//! Lookup provider client and the geocoding engine for locus.
//!
//! This crate provides the Nominatim HTTP client, the provider seam used by
//! the engine, and the [`Geocoder`] itself: resolution chain, batch
//! coordinator and suggestions.

pub mod geocode;
pub mod nominatim;
pub mod provider;

pub use geocode::{
    BatchOptions, BatchReport, BatchSummary, CITY_TIER, COUNTRY_TIER, DEFAULT_MIN_CONFIDENCE, FallbackTier, Geocoder,
    Pacing, ScoringWeights, simplify_address,
};

pub use nominatim::{NominatimClient, NominatimConfig, ProviderError};
pub use provider::{Candidate, GeocodeProvider};
