//! Cache Service Module
//!
//! Digest-addressed put/get over a [`KvStore`], classifying store outcomes
//! into found, not-found and backend failures.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::cache::{CacheEntry, CacheStats, StatsSnapshot};
use crate::digest::is_digest;
use crate::error::{CacheError, Result};
use crate::store::{KvStore, Lookup, PoolStatus, StoreError, StoreResult};

// == Cache Service ==
/// Stores messages under their digest and looks them up again.
///
/// Every call performs exactly one store round-trip; nothing is retried.
pub struct CacheService {
    store: Arc<dyn KvStore>,
    stats: CacheStats,
}

impl CacheService {
    /// Creates a service over `store`.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            stats: CacheStats::new(),
        }
    }

    // == Put ==
    /// Stores `message` under its digest and returns the digest.
    ///
    /// A rejected write still carries the computed digest in
    /// [`CacheError::StoreWriteFailed`], but the message is not stored.
    pub async fn put(&self, message: impl Into<String>) -> Result<String> {
        let entry = CacheEntry::from_message(message);

        match self.store.set(&entry.digest, &entry.message).await {
            Ok(()) => {
                self.stats.record_put();
                debug!(digest = %entry.digest, "Stored message");
                Ok(entry.digest)
            }
            Err(StoreError::Unavailable(reason)) => {
                self.stats.record_backend_error();
                error!(digest = %entry.digest, %reason, "Store unavailable during put");
                Err(CacheError::BackendUnavailable(reason))
            }
            Err(StoreError::Command(reason)) => {
                self.stats.record_backend_error();
                error!(digest = %entry.digest, %reason, "Store write failed");
                Err(CacheError::StoreWriteFailed {
                    digest: entry.digest,
                    reason,
                })
            }
        }
    }

    // == Get ==
    /// Looks up the message stored under `digest`.
    ///
    /// An absent key is [`CacheError::NotFound`], never a backend failure.
    /// Keys that are not digest-shaped are still looked up.
    pub async fn get(&self, digest: &str) -> Result<String> {
        if !is_digest(digest) {
            debug!(digest, "Lookup key is not a SHA-256 hex digest");
        }

        match self.store.get(digest).await {
            Ok(Lookup::Found(message)) => {
                self.stats.record_hit();
                let entry = CacheEntry::new(digest, message);
                if !entry.is_consistent() {
                    warn!(digest, "Stored message does not hash to its digest");
                }
                Ok(entry.message)
            }
            Ok(Lookup::Absent) => {
                self.stats.record_miss();
                debug!(digest, "Digest not found");
                Err(CacheError::NotFound(digest.to_string()))
            }
            Err(StoreError::Unavailable(reason)) => {
                self.stats.record_backend_error();
                error!(digest, %reason, "Store unavailable during get");
                Err(CacheError::BackendUnavailable(reason))
            }
            Err(StoreError::Command(reason)) => {
                self.stats.record_backend_error();
                error!(digest, %reason, "Store read failed");
                Err(CacheError::StoreReadFailed(reason))
            }
        }
    }

    // == Diagnostics ==
    /// Checks that the store answers.
    pub async fn ping(&self) -> StoreResult<()> {
        self.store.ping().await
    }

    /// Returns current service counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Returns store pool occupancy, if the store pools connections.
    pub fn pool_status(&self) -> Option<PoolStatus> {
        self.store.pool_status()
    }
}
