//! Configuration Module
//!
//! Server configuration from command-line flags, with environment variable
//! fallbacks and documented defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::store::PoolConfig;

const DEFAULT_HTTPS_SERVER_ADDRESS: &str = "0.0.0.0:5000";
const DEFAULT_REDIS_SERVER_ADDRESS: &str = "redis:6379";
const DEFAULT_SERVER_SSL_CERT: &str = "localhost.crt";
const DEFAULT_SERVER_SSL_KEY: &str = "localhost.key";
const DEFAULT_MAX_ACTIVE: usize = 50;
const DEFAULT_MAX_IDLE: usize = 10;

/// Server configuration parameters.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "shasum_cacher",
    version,
    about = "Caches messages in Redis under their SHA-256 digest, served over HTTPS"
)]
pub struct Config {
    /// Address on which to serve HTTPS requests
    #[arg(long, env = "HTTPS_SERVER_ADDRESS", default_value = DEFAULT_HTTPS_SERVER_ADDRESS)]
    pub https_server_address: SocketAddr,

    /// Redis server where message digests are cached (host:port or redis:// URL)
    #[arg(long, env = "REDIS_SERVER_ADDRESS", default_value = DEFAULT_REDIS_SERVER_ADDRESS)]
    pub redis_server_address: String,

    /// PEM certificate chain for the HTTPS server
    #[arg(long, env = "SERVER_SSL_CERT", default_value = DEFAULT_SERVER_SSL_CERT)]
    pub server_ssl_cert: PathBuf,

    /// PEM private key for the HTTPS server
    #[arg(long, env = "SERVER_SSL_KEY", default_value = DEFAULT_SERVER_SSL_KEY)]
    pub server_ssl_key: PathBuf,

    /// Maximum store connections in use at once
    #[arg(long, env = "MAX_ACTIVE", default_value_t = DEFAULT_MAX_ACTIVE)]
    pub max_active: usize,

    /// Maximum idle store connections kept open
    #[arg(long, env = "MAX_IDLE", default_value_t = DEFAULT_MAX_IDLE)]
    pub max_idle: usize,

    /// Largest accepted request body in bytes; unlimited when unset
    #[arg(long, env = "MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,
}

impl Config {
    /// Parses flags and environment variables, exiting with usage on error.
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Store connection pool limits.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.max_active, self.max_idle)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            https_server_address: SocketAddr::from(([0, 0, 0, 0], 5000)),
            redis_server_address: DEFAULT_REDIS_SERVER_ADDRESS.to_string(),
            server_ssl_cert: PathBuf::from(DEFAULT_SERVER_SSL_CERT),
            server_ssl_key: PathBuf::from(DEFAULT_SERVER_SSL_KEY),
            max_active: DEFAULT_MAX_ACTIVE,
            max_idle: DEFAULT_MAX_IDLE,
            max_body_bytes: None,
        }
    }
}
