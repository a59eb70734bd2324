//! Cache Statistics Module
//!
//! Tracks service outcomes: stored messages, hits, misses and backend errors.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Lock-free counters shared by every request.
#[derive(Debug, Default)]
pub struct CacheStats {
    puts: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    backend_errors: AtomicU64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Recorders ==
    /// Counts a message written to the store.
    pub fn record_put(&self) {
        self.puts.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a digest found in the store.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a digest absent from the store.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a failed store round-trip.
    pub fn record_backend_error(&self) {
        self.backend_errors.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Reads all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot::new(
            self.puts.load(Ordering::Relaxed),
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.backend_errors.load(Ordering::Relaxed),
        )
    }
}

// == Stats Snapshot ==
/// Point-in-time copy of [`CacheStats`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub puts: u64,
    pub hits: u64,
    pub misses: u64,
    pub backend_errors: u64,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl StatsSnapshot {
    fn new(puts: u64, hits: u64, misses: u64, backend_errors: u64) -> Self {
        let lookups = hits + misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            hits as f64 / lookups as f64
        };
        Self {
            puts,
            hits,
            misses,
            backend_errors,
            hit_rate,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new().snapshot();
        assert_eq!(stats.puts, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.backend_errors, 0);
    }

    #[test]
    fn test_hit_rate_no_lookups() {
        let stats = CacheStats::new();
        stats.record_put();
        assert_eq!(stats.snapshot().hit_rate, 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.snapshot().hit_rate, 0.75);
    }

    #[test]
    fn test_backend_errors_do_not_affect_hit_rate() {
        let stats = CacheStats::new();
        stats.record_hit();
        stats.record_backend_error();
        stats.record_backend_error();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.backend_errors, 2);
        assert_eq!(snapshot.hit_rate, 1.0);
    }
}
