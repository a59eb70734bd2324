//! API Routes
//!
//! Configures the Axum router with all message cache endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{fetch_handler, health_handler, stats_handler, submit_handler, AppState};

/// First path segment of the message resource.
pub const MESSAGES_RESOURCE: &str = "messages";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /messages` - Store a message, answering with its digest
/// - `GET /messages/:digest` - Fetch a message by digest
/// - `GET /health` - Store reachability and pool status
/// - `GET /stats` - Service counters and pool status
///
/// The verb picks the operation on the message resource: POST submits, any
/// other verb fetches. Fetch parses the path itself so that a wrong segment
/// count is reported as a bad request instead of an unmatched route.
///
/// Request bodies are not size-limited; see [`create_router_with_body_limit`].
pub fn create_router(state: AppState) -> Router {
    create_router_with_body_limit(state, None)
}

/// Creates the router, rejecting request bodies over `max_body_bytes` with
/// `413 Payload Too Large`. `None` disables the limit.
pub fn create_router_with_body_limit(
    state: AppState,
    max_body_bytes: Option<usize>,
) -> Router {
    let body_limit = match max_body_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/messages", messages())
        .route("/messages/", messages())
        .route("/messages/*rest", messages())
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn messages() -> MethodRouter<AppState> {
    post(submit_handler).fallback(fetch_handler)
}
