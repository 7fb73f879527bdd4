//! Geocode cache rows.
//!
//! One row per normalized-address hash. Rows are created on the first
//! successful resolution and refreshed in place afterwards.

use super::connection::CacheDb;
use super::{format_timestamp, timestamp_now};
use crate::Error;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// A resolved address as stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CacheEntry {
    pub hash: String,
    pub original_address: String,
    pub normalized_address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// 0-100.
    pub confidence: u8,
    pub provider: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country_code: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Operational counters over the whole cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CacheStats {
    pub total: u64,
    pub with_coordinates: u64,
    /// `None` when the cache is empty.
    pub average_confidence: Option<f64>,
    pub created_last_24h: u64,
}

impl CacheDb {
    /// Get an entry by hash.
    ///
    /// Returns None if the hash is unknown or the row has no coordinates.
    pub async fn get_entry(&self, hash: &str) -> Result<Option<CacheEntry>, Error> {
        let hash = hash.to_string();
        self.conn
            .call(move |conn| -> Result<Option<CacheEntry>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT
                    hash, original_address, normalized_address, latitude, longitude,
                    confidence, provider, city, state, country_code, created_at, updated_at
                FROM geocode_cache WHERE hash = ?1",
                )?;

                let result = stmt.query_row(params![hash], |row| {
                    let latitude: Option<f64> = row.get(3)?;
                    let longitude: Option<f64> = row.get(4)?;
                    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
                        return Ok(None);
                    };

                    Ok(Some(CacheEntry {
                        hash: row.get(0)?,
                        original_address: row.get(1)?,
                        normalized_address: row.get(2)?,
                        latitude,
                        longitude,
                        confidence: row.get(5)?,
                        provider: row.get(6)?,
                        city: row.get(7)?,
                        state: row.get(8)?,
                        country_code: row.get(9)?,
                        created_at: row.get(10)?,
                        updated_at: row.get(11)?,
                    }))
                });

                match result {
                    Ok(entry) => Ok(entry),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Insert or refresh an entry.
    ///
    /// Relies on `ON CONFLICT(hash)` so concurrent writers for the same hash
    /// never interleave a read with a write. The stored `created_at` survives
    /// a conflict; `updated_at` is set to now. Timestamps on `entry` are ignored.
    pub async fn upsert_entry(&self, entry: &CacheEntry) -> Result<(), Error> {
        let entry = entry.clone();
        let now = timestamp_now();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO geocode_cache (
                    hash, original_address, normalized_address, latitude, longitude,
                    confidence, provider, city, state, country_code, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
                ON CONFLICT(hash) DO UPDATE SET
                    original_address = excluded.original_address,
                    normalized_address = excluded.normalized_address,
                    latitude = excluded.latitude,
                    longitude = excluded.longitude,
                    confidence = excluded.confidence,
                    provider = excluded.provider,
                    city = excluded.city,
                    state = excluded.state,
                    country_code = excluded.country_code,
                    updated_at = excluded.updated_at",
                    params![
                        &entry.hash,
                        &entry.original_address,
                        &entry.normalized_address,
                        entry.latitude,
                        entry.longitude,
                        entry.confidence,
                        &entry.provider,
                        &entry.city,
                        &entry.state,
                        &entry.country_code,
                        &now,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Count rows, rows with coordinates, average confidence and rows
    /// created within the last 24 hours.
    pub async fn entry_stats(&self) -> Result<CacheStats, Error> {
        let since = format_timestamp(Utc::now() - Duration::hours(24));
        self.conn
            .call(move |conn| -> Result<CacheStats, Error> {
                let stats = conn.query_row(
                    "SELECT
                    COUNT(*),
                    COUNT(CASE WHEN latitude IS NOT NULL AND longitude IS NOT NULL THEN 1 END),
                    AVG(confidence),
                    COUNT(CASE WHEN created_at >= ?1 THEN 1 END)
                FROM geocode_cache",
                    params![since],
                    |row| {
                        Ok(CacheStats {
                            total: row.get::<_, i64>(0)? as u64,
                            with_coordinates: row.get::<_, i64>(1)? as u64,
                            average_confidence: row.get(2)?,
                            created_last_24h: row.get::<_, i64>(3)? as u64,
                        })
                    },
                )?;
                Ok(stats)
            })
            .await
            .map_err(Error::from)
    }
}
