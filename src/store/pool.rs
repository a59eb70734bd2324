//! Connection Pool Module
//!
//! Bounded pool of reusable store connections.
//!
//! At most `max_active` connections are checked out at once; further callers
//! wait on a semaphore instead of failing. Released connections are kept warm
//! up to `max_idle` and closed beyond that.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::debug;

use super::{StoreError, StoreResult};

// == Connector Trait ==
/// Dials new connections to the store.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Connection type handed out by the pool
    type Connection: Send + 'static;

    /// Opens a new connection, failing with [`StoreError::Unavailable`].
    async fn connect(&self) -> StoreResult<Self::Connection>;

    /// Network address being dialed, for logging.
    fn target(&self) -> &str;
}

// == Pool Config ==
/// Sizing limits for a [`Pool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Hard ceiling on checked-out connections
    pub max_active: usize,
    /// Connections kept open between bursts
    pub max_idle: usize,
}

impl PoolConfig {
    /// Creates a config, raising `max_active` to at least one and capping
    /// `max_idle` at `max_active`.
    pub fn new(max_active: usize, max_idle: usize) -> Self {
        let max_active = max_active.max(1);
        Self {
            max_active,
            max_idle: max_idle.min(max_active),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(50, 10)
    }
}

// == Pool Status ==
/// Point-in-time occupancy of a [`Pool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStatus {
    /// Connections currently checked out
    pub active: usize,
    /// Connections waiting in the idle set
    pub idle: usize,
    pub max_active: usize,
    pub max_idle: usize,
}

// == Pool ==
/// Bounded pool of connections produced by a [`Connector`].
pub struct Pool<C: Connector> {
    connector: C,
    permits: Semaphore,
    idle: Mutex<Vec<C::Connection>>,
    config: PoolConfig,
}

impl<C: Connector> Pool<C> {
    /// Creates an empty pool. No connection is dialed until first use.
    pub fn new(connector: C, config: PoolConfig) -> Self {
        let config = PoolConfig::new(config.max_active, config.max_idle);
        Self {
            connector,
            permits: Semaphore::new(config.max_active),
            idle: Mutex::new(Vec::with_capacity(config.max_idle)),
            config,
        }
    }

    /// Checks out a connection, waiting while `max_active` are in use.
    ///
    /// Reuses an idle connection when one exists, otherwise dials a new one.
    /// A dial failure releases the slot and is returned to the caller as is.
    pub async fn acquire(&self) -> StoreResult<PooledConnection<'_, C>> {
        let permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| StoreError::Unavailable("connection pool is closed".to_string()))?;

        let conn = match self.take_idle() {
            Some(conn) => conn,
            None => {
                debug!(store = self.connector.target(), "Dialing new store connection");
                self.connector.connect().await?
            }
        };

        Ok(PooledConnection {
            pool: self,
            conn: Some(conn),
            broken: false,
            _permit: permit,
        })
    }

    /// Returns current occupancy.
    pub fn status(&self) -> PoolStatus {
        PoolStatus {
            active: self.config.max_active - self.permits.available_permits(),
            idle: self.idle_set().len(),
            max_active: self.config.max_active,
            max_idle: self.config.max_idle,
        }
    }

    /// Returns the underlying connector.
    pub fn connector(&self) -> &C {
        &self.connector
    }

    fn take_idle(&self) -> Option<C::Connection> {
        self.idle_set().pop()
    }

    fn release(&self, conn: C::Connection) {
        let mut idle = self.idle_set();
        if idle.len() < self.config.max_idle {
            idle.push(conn);
        } else {
            debug!(
                store = self.connector.target(),
                "Idle set full, closing store connection"
            );
        }
    }

    fn idle_set(&self) -> std::sync::MutexGuard<'_, Vec<C::Connection>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// == Pooled Connection ==
/// A checked-out connection, returned to its pool when dropped.
///
/// Holds a pool slot for its whole lifetime, so the connection goes back to
/// the idle set before the next waiter is admitted.
pub struct PooledConnection<'a, C: Connector> {
    pool: &'a Pool<C>,
    conn: Option<C::Connection>,
    broken: bool,
    _permit: SemaphorePermit<'a>,
}

impl<C: Connector> PooledConnection<'_, C> {
    /// Marks the connection unusable; it is closed instead of reused.
    pub fn discard(&mut self) {
        self.broken = true;
    }
}

impl<C: Connector> Deref for PooledConnection<'_, C> {
    type Target = C::Connection;

    fn deref(&self) -> &Self::Target {
        self.conn
            .as_ref()
            .expect("pooled connection is present until dropped")
    }
}

impl<C: Connector> DerefMut for PooledConnection<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.conn
            .as_mut()
            .expect("pooled connection is present until dropped")
    }
}

impl<C: Connector> Drop for PooledConnection<'_, C> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if self.broken {
                debug!(
                    store = self.pool.connector.target(),
                    "Closing broken store connection"
                );
            } else {
                self.pool.release(conn);
            }
        }
    }
}
