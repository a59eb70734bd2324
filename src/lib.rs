//! shasum_cacher - A digest-addressed message cache
//!
//! Stores messages in Redis under their SHA-256 digest and serves them back
//! by digest over HTTPS.

pub mod api;
pub mod cache;
pub mod config;
pub mod digest;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use cache::CacheService;
pub use config::Config;
