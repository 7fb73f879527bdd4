//! Batch coordinator.
//!
//! Records are resolved in chunks of `max_concurrent`. A chunk runs all of
//! its items concurrently and must finish before the next one starts, with
//! [`Pacing::between_chunks`](super::Pacing::between_chunks) in between.
//! No pause follows the last chunk.

use std::time::Instant;

use locus_core::LocationRecord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use super::Geocoder;
use super::chain::DEFAULT_MIN_CONFIDENCE;

pub const DEFAULT_MAX_CONCURRENT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub min_confidence: u8,
    /// Chunk size; values below 1 are treated as 1.
    pub max_concurrent: usize,
    /// Leave records that already carry both coordinates alone.
    pub skip_resolved: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self { min_confidence: DEFAULT_MIN_CONFIDENCE, max_concurrent: DEFAULT_MAX_CONCURRENT, skip_resolved: false }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BatchSummary {
    pub total: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub skipped: usize,
}

/// Annotated records in input order plus counters.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub locations: Vec<LocationRecord>,
    pub summary: BatchSummary,
}

impl Geocoder {
    /// Resolve every record and return them in input order.
    ///
    /// Unresolved records keep the coordinates they came with; annotations
    /// from an earlier run are cleared.
    pub async fn geocode_batch(&self, records: Vec<LocationRecord>, options: BatchOptions) -> Vec<LocationRecord> {
        self.geocode_batch_report(records, options).await.locations
    }

    /// Like [`Geocoder::geocode_batch`], with a summary of what happened.
    pub async fn geocode_batch_report(&self, records: Vec<LocationRecord>, options: BatchOptions) -> BatchReport {
        let started = Instant::now();
        let chunk_size = options.max_concurrent.max(1);
        let mut locations = records;
        let mut summary = BatchSummary { total: locations.len(), ..Default::default() };

        let pending: Vec<usize> = locations
            .iter()
            .enumerate()
            .filter(|(_, record)| !(options.skip_resolved && record.has_coordinates()))
            .map(|(index, _)| index)
            .collect();
        summary.skipped = summary.total - pending.len();

        let chunk_count = pending.len().div_ceil(chunk_size);
        for (chunk_index, chunk) in pending.chunks(chunk_size).enumerate() {
            if chunk_index > 0 {
                self.pacing.between_chunks().await;
            }

            let mut tasks = JoinSet::new();
            for &index in chunk {
                let geocoder = self.clone();
                let record = locations[index].clone();
                let min_confidence = options.min_confidence;
                tasks.spawn(async move { (index, geocoder.resolve_location(&record, min_confidence).await) });
            }

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((index, Some(result))) => {
                        locations[index].apply(&result);
                        summary.resolved += 1;
                    }
                    Ok((index, None)) => locations[index].clear_resolution(),
                    Err(err) => tracing::error!(error = %err, "batch item task failed, record left unchanged"),
                }
            }

            tracing::debug!(chunk = chunk_index + 1, chunks = chunk_count, size = chunk.len(), "batch chunk complete");
        }

        summary.unresolved = summary.total - summary.resolved - summary.skipped;
        tracing::info!(
            total = summary.total,
            resolved = summary.resolved,
            unresolved = summary.unresolved,
            skipped = summary.skipped,
            chunk_size,
            duration_ms = started.elapsed().as_millis() as u64,
            "geocode batch complete"
        );

        BatchReport { locations, summary }
    }
}
