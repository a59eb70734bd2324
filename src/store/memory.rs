//! In-memory store backend.
//!
//! Keeps entries in a process-local map. Used for tests and local runs without
//! Redis; a failure can be injected to simulate an unreachable store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KvStore, Lookup, StoreError, StoreResult};

/// Process-local [`KvStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    failure: Mutex<Option<StoreError>>,
    operations: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty, healthy store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following operation fail with `failure`, or heals the store with `None`.
    pub fn set_failure(&self, failure: Option<StoreError>) {
        *self
            .failure
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = failure;
    }

    /// Number of GET/SET/PING calls received, failed ones included.
    pub fn operations(&self) -> u64 {
        self.operations.load(Ordering::SeqCst)
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn begin(&self) -> StoreResult<()> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        match self
            .failure
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Lookup> {
        self.begin()?;
        Ok(match self.entries.read().await.get(key) {
            Some(value) => Lookup::Found(value.clone()),
            None => Lookup::Absent,
        })
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.begin()?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.begin()
    }
}
