//! Cache-related MCP tools.
//!
//! Read-only views of the geocode cache. Entries are only written by
//! resolution.

pub mod get;
pub mod stats;

pub use get::{CacheGetParams, get_impl};
pub use stats::stats_impl;
