//! API Handlers
//!
//! HTTP request handlers for each message cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{StatusCode, Uri},
    Json,
};
use tracing::{debug, warn};

use crate::cache::CacheService;
use crate::error::{CacheError, Result};
use crate::models::{FetchResponse, HealthResponse, StatsResponse, SubmitRequest, SubmitResponse};
use crate::store::KvStore;

use super::routes::MESSAGES_RESOURCE;

/// Application state shared across all handlers.
///
/// The cache service owns the store and its connection pool; handlers only
/// ever reach the store through it.
#[derive(Clone)]
pub struct AppState {
    /// Digest-addressed cache service
    pub service: Arc<CacheService>,
}

impl AppState {
    /// Creates a new AppState with the given cache service.
    pub fn new(service: CacheService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Creates a new AppState serving messages from `store`.
    pub fn from_store(store: Arc<dyn KvStore>) -> Self {
        Self::new(CacheService::new(store))
    }
}

/// Handler for POST /messages
///
/// Stores the submitted message and answers `201 Created` with its digest.
/// An unparseable or oversized body is rejected before the cache service is
/// called.
pub async fn submit_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitResponse>)> {
    let Json(req) = payload.map_err(|rejection| {
        debug!(error = %rejection, status = %rejection.status(), "Rejected submit body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            CacheError::PayloadTooLarge(rejection.body_text())
        } else {
            CacheError::MalformedRequest(rejection.body_text())
        }
    })?;

    let digest = state.service.put(req.message).await?;

    Ok((StatusCode::CREATED, Json(SubmitResponse::new(digest))))
}

/// Handler for every non-POST request on /messages
///
/// The path must be exactly `/messages/<digest>`.
pub async fn fetch_handler(State(state): State<AppState>, uri: Uri) -> Result<Json<FetchResponse>> {
    let digest = parse_digest_path(uri.path())?;
    let message = state.service.get(digest).await?;

    Ok(Json(FetchResponse::new(message)))
}

/// Handler for GET /health
///
/// Answers 200 when the store replies to PING, 503 otherwise.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let pool = state.service.pool_status();

    match state.service.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy(pool))),
        Err(err) => {
            warn!(error = %err, "Health check could not reach store");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::unavailable(pool)),
            )
        }
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.service.stats(),
        state.service.pool_status(),
    ))
}

/// Extracts the single digest segment from a `/messages/<digest>` path.
pub fn parse_digest_path(path: &str) -> Result<&str> {
    let segments: Vec<&str> = path.strip_prefix('/').unwrap_or(path).split('/').collect();

    match segments.as_slice() {
        &[resource, digest] if resource == MESSAGES_RESOURCE && !digest.is_empty() => Ok(digest),
        _ => {
            debug!(path, "Malformed message path");
            Err(CacheError::MalformedRequest(format!(
                "URL should be of the form \"/{}/<digest>\", got \"{}\"",
                MESSAGES_RESOURCE, path
            )))
        }
    }
}
