//! Store Module
//!
//! Key-value store abstraction over the external cache backend, the bounded
//! connection pool that fronts it, and the available backends.

mod memory;
mod pool;
mod redis_store;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStore;
pub use pool::{Connector, Pool, PoolConfig, PoolStatus, PooledConnection};
pub use redis_store::{RedisConnector, RedisStore};

// == Lookup ==
/// Result of a successful GET round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The key holds a value
    Found(String),
    /// The key is absent from the store
    Absent,
}

// == Store Error ==
/// Failure of a single store round-trip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be dialed
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store was reached but the command failed
    #[error("store command failed: {0}")]
    Command(String),
}

/// Convenience Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == KvStore Trait ==
/// A key-value store holding digest → message entries.
///
/// Each call performs exactly one round-trip and never retries.
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    /// Looks up `key`, reporting an absent key as [`Lookup::Absent`].
    async fn get(&self, key: &str) -> StoreResult<Lookup>;

    /// Stores `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Checks that the store answers.
    async fn ping(&self) -> StoreResult<()>;

    /// Connection pool occupancy, for stores that pool connections.
    fn pool_status(&self) -> Option<PoolStatus> {
        None
    }
}
