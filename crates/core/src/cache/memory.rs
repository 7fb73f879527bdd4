//! In-memory cache backend.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use super::{CacheEntry, CacheStats, Error, GeocodeCache, format_timestamp, timestamp_now};

/// Map-backed [`GeocodeCache`] with the same upsert semantics as [`super::CacheDb`].
///
/// Nothing is persisted; dropping the cache drops every entry.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl GeocodeCache for MemoryCache {
    async fn get(&self, hash: &str) -> Result<Option<CacheEntry>, Error> {
        Ok(self.entries.read().await.get(hash).cloned())
    }

    async fn upsert(&self, entry: &CacheEntry) -> Result<(), Error> {
        let now = timestamp_now();
        let mut entries = self.entries.write().await;
        let created_at = entries
            .get(&entry.hash)
            .map(|existing| existing.created_at.clone())
            .unwrap_or_else(|| now.clone());

        entries.insert(entry.hash.clone(), CacheEntry { created_at, updated_at: now, ..entry.clone() });
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats, Error> {
        let since = format_timestamp(Utc::now() - Duration::hours(24));
        let entries = self.entries.read().await;

        let total = entries.len() as u64;
        let average_confidence = (total > 0)
            .then(|| entries.values().map(|e| f64::from(e.confidence)).sum::<f64>() / total as f64);

        Ok(CacheStats {
            total,
            with_coordinates: total,
            average_confidence,
            created_last_24h: entries.values().filter(|e| e.created_at >= since).count() as u64,
        })
    }
}
