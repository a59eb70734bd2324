//! shasum_cacher - A digest-addressed message cache
//!
//! Stores messages in Redis under their SHA-256 digest and serves them back
//! by digest over HTTPS.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum_server::{tls_rustls::RustlsConfig, Handle};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shasum_cacher::{
    api::create_router_with_body_limit, store::RedisStore, AppState, CacheService, Config,
};

/// Time allowed for in-flight requests to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Main entry point for the message cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Parse configuration from flags and environment variables
/// 3. Create the Redis store and its connection pool
/// 4. Create Axum router with all endpoints
/// 5. Load TLS certificate and key
/// 6. Start HTTPS server on configured address
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shasum_cacher=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting message cache server");

    let config = Config::from_args();
    info!(
        "Configuration loaded: https_server_address={}, redis_server_address={}, max_active={}, max_idle={}, max_body_bytes={:?}",
        config.https_server_address,
        config.redis_server_address,
        config.max_active,
        config.max_idle,
        config.max_body_bytes
    );

    // The pool dials lazily, so an unreachable Redis does not stop startup
    let store = RedisStore::from_config(&config).context("Invalid Redis server address")?;
    let state = AppState::new(CacheService::new(Arc::new(store)));
    info!("Store client pool initialized");

    let app = create_router_with_body_limit(state, config.max_body_bytes);

    let tls = RustlsConfig::from_pem_file(&config.server_ssl_cert, &config.server_ssl_key)
        .await
        .with_context(|| {
            format!(
                "Failed to load TLS material from {} and {}",
                config.server_ssl_cert.display(),
                config.server_ssl_key.display()
            )
        })?;

    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    info!("Server listening on https://{}", config.https_server_address);
    axum_server::bind_rustls(config.https_server_address, tls)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .context("Failed to open HTTPS listener")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, stops accepting connections and lets in-flight
/// requests finish.
async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
