//! Content-addressed cache key generation.

use sha2::{Digest, Sha256};

/// Compute the cache key for a normalized address.
///
/// SHA-256 of the normalized text, hex encoded.
pub fn address_cache_key(normalized: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check that `hash` looks like a key produced by [`address_cache_key`].
pub fn is_valid_key(hash: &str) -> bool {
    hash.len() == 64 && hash.chars().all(|c| c.is_ascii_hexdigit())
}
