//! Redis Store Module
//!
//! [`KvStore`] backed by Redis through a bounded [`Pool`] of connections.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisError};
use tracing::warn;

use super::{Connector, KvStore, Lookup, Pool, PoolConfig, PoolStatus, PooledConnection};
use super::{StoreError, StoreResult};
use crate::config::Config;

// == Redis Connector ==
/// Dials Redis connections for the pool.
pub struct RedisConnector {
    client: redis::Client,
    target: String,
}

impl RedisConnector {
    /// Creates a connector for `address`, either `host:port` or a `redis://` URL.
    ///
    /// Only validates the address; nothing is dialed here.
    pub fn new(address: &str) -> StoreResult<Self> {
        let url = redis_url(address);
        let client = redis::Client::open(url.as_str()).map_err(|e| {
            StoreError::Unavailable(format!("invalid store address {}: {}", address, e))
        })?;

        Ok(Self {
            client,
            target: address.to_string(),
        })
    }
}

#[async_trait]
impl Connector for RedisConnector {
    type Connection = MultiplexedConnection;

    async fn connect(&self) -> StoreResult<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to dial {}: {}", self.target, e)))
    }

    fn target(&self) -> &str {
        &self.target
    }
}

// == Redis Store ==
/// Digest → message store living in Redis.
pub struct RedisStore {
    pool: Pool<RedisConnector>,
}

impl RedisStore {
    /// Creates a store for `address` with the given pool limits.
    pub fn new(address: &str, config: PoolConfig) -> StoreResult<Self> {
        Ok(Self {
            pool: Pool::new(RedisConnector::new(address)?, config),
        })
    }

    /// Creates a store from server configuration.
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        Self::new(&config.redis_server_address, config.pool_config())
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Lookup> {
        let mut conn = self.pool.acquire().await?;
        let reply: redis::RedisResult<Option<String>> = conn.get(key).await;

        match reply {
            Ok(Some(value)) => Ok(Lookup::Found(value)),
            Ok(None) => Ok(Lookup::Absent),
            Err(err) => Err(command_failed(&mut conn, "GET", err)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;
        let reply: redis::RedisResult<()> = conn.set(key, value).await;

        reply.map_err(|err| command_failed(&mut conn, "SET", err))
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;
        let reply: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut *conn).await;

        reply
            .map(|_| ())
            .map_err(|err| command_failed(&mut conn, "PING", err))
    }

    fn pool_status(&self) -> Option<PoolStatus> {
        Some(self.pool.status())
    }
}

/// Classifies a command error, dropping the connection if it is no longer usable.
fn command_failed(
    conn: &mut PooledConnection<'_, RedisConnector>,
    command: &str,
    err: RedisError,
) -> StoreError {
    if err.is_io_error() || err.is_connection_dropped() || err.is_timeout() {
        warn!(command, error = %err, "Discarding broken store connection");
        conn.discard();
    }
    StoreError::Command(format!("{} failed: {}", command, err))
}

/// Normalizes a bare `host:port` into a `redis://` URL.
fn redis_url(address: &str) -> String {
    if address.contains("://") {
        address.to_string()
    } else {
        format!("redis://{}", address)
    }
}
