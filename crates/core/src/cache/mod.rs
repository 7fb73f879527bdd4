//! Content cache for resolved addresses.
//!
//! Entries are keyed by the SHA-256 of the normalized address and are never
//! expired or deleted; re-resolving an address refreshes its row.
//!
//! - [`GeocodeCache`] is the interface the engine depends on
//! - [`CacheDb`] persists to SQLite via tokio-rusqlite (WAL mode, migrations)
//! - [`MemoryCache`] keeps entries in a map, for tests and ephemeral runs

pub mod connection;
pub mod entries;
pub mod hash;
pub mod memory;
pub mod migrations;

pub use crate::Error;

use async_trait::async_trait;

pub use connection::CacheDb;
pub use entries::{CacheEntry, CacheStats};
pub use memory::MemoryCache;

/// Storage backend for resolved addresses.
///
/// Implementations must tolerate concurrent callers. Writes for the same hash
/// resolve last-write-wins through the backend's own insert-or-update.
#[async_trait]
pub trait GeocodeCache: Send + Sync {
    /// Look up an entry. Never has side effects.
    async fn get(&self, hash: &str) -> Result<Option<CacheEntry>, Error>;

    /// Insert `entry` under `entry.hash`, or refresh the existing row.
    ///
    /// The first `created_at` is kept; `updated_at` always moves forward.
    async fn upsert(&self, entry: &CacheEntry) -> Result<(), Error>;

    /// Operational counters. Not used during resolution.
    async fn stats(&self) -> Result<CacheStats, Error>;
}

#[async_trait]
impl GeocodeCache for CacheDb {
    async fn get(&self, hash: &str) -> Result<Option<CacheEntry>, Error> {
        self.get_entry(hash).await
    }

    async fn upsert(&self, entry: &CacheEntry) -> Result<(), Error> {
        self.upsert_entry(entry).await
    }

    async fn stats(&self) -> Result<CacheStats, Error> {
        self.entry_stats().await
    }
}

/// Current time in the fixed format used for every cache timestamp.
///
/// Microsecond precision with a `Z` suffix keeps lexical and chronological
/// order identical.
pub fn timestamp_now() -> String {
    format_timestamp(chrono::Utc::now())
}

pub(crate) fn format_timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
