//! Cache Module
//!
//! Digest-addressed message caching on top of the external store.

mod entry;
mod service;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use service::CacheService;
pub use stats::{CacheStats, StatsSnapshot};
