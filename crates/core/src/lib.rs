//! Core types and shared functionality for locus.
//!
//! This crate provides:
//! - Address normalization and content-addressed cache keys
//! - Geocode cache with SQLite and in-memory backends
//! - Location and result types shared by the engine and the server
//! - Unified error types
//! - Configuration structures

pub mod address;
pub mod cache;
pub mod config;
pub mod error;
pub mod location;

pub use address::{NormalizedQuery, normalize_address};
pub use cache::{CacheDb, CacheEntry, CacheStats, GeocodeCache, MemoryCache};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use location::{Alternative, GeocodeResult, LocationRecord, ResolutionTier, Suggestion};
