//! Address canonicalization for stable cache keys.
//!
//! Rules, applied in order:
//! - lower-case
//! - drop everything except word characters, whitespace, `,`, `.` and `-`
//! - collapse whitespace runs to a single space
//! - trim
//!
//! Street-type tokens (`street`/`st`, `avenue`/`ave`, `road`/`rd`, ...) are
//! neither expanded nor abbreviated; they pass through as written.

use crate::cache::hash::address_cache_key;

/// Canonicalize a free-text address.
///
/// Blank input yields an empty string.
pub fn normalize_address(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace() || matches!(c, ',' | '.' | '-'))
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A normalized address together with its content hash.
///
/// Recomputed per call and never stored on its own; the hash is the cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub original: String,
    pub normalized: String,
    pub hash: String,
}

impl NormalizedQuery {
    /// Normalize and hash `raw`.
    ///
    /// Returns `None` when nothing survives normalization, so blank input
    /// never reaches the cache or the provider.
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = normalize_address(raw);
        if normalized.is_empty() {
            return None;
        }

        Some(Self { original: raw.trim().to_string(), hash: address_cache_key(&normalized), normalized })
    }
}
