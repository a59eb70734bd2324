//! Request DTOs for the message cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for submitting a message (POST /messages)
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    /// The message to store
    pub message: String,
}
