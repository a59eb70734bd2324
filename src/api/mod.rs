//! API Module
//!
//! HTTP handlers and routing for the message cache REST API.
//!
//! # Endpoints
//! - `POST /messages` - Store a message under its SHA-256 digest
//! - `GET /messages/:digest` - Fetch a message by digest
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Service statistics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, create_router_with_body_limit, MESSAGES_RESOURCE};
