//! Response DTOs for the message cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::StatsSnapshot;
use crate::store::PoolStatus;

/// Response body for a stored message (POST /messages)
#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    /// Hex SHA-256 digest the message is stored under
    pub digest: String,
}

impl SubmitResponse {
    /// Creates a new SubmitResponse
    pub fn new(digest: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
        }
    }
}

/// Response body for a fetched message (GET /messages/:digest)
#[derive(Debug, Clone, Serialize)]
pub struct FetchResponse {
    /// The original message
    pub message: String,
}

impl FetchResponse {
    /// Creates a new FetchResponse
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Service outcome counters
    #[serde(flatten)]
    pub service: StatsSnapshot,
    /// Store connection pool occupancy, if pooled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolStatus>,
}

impl StatsResponse {
    /// Creates a new StatsResponse
    pub fn new(service: StatsSnapshot, pool: Option<PoolStatus>) -> Self {
        Self { service, pool }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" when the store answers, "unavailable" otherwise
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolStatus>,
}

impl HealthResponse {
    /// Creates a HealthResponse for a reachable store
    pub fn healthy(pool: Option<PoolStatus>) -> Self {
        Self::with_status("healthy", pool)
    }

    /// Creates a HealthResponse for an unreachable store
    pub fn unavailable(pool: Option<PoolStatus>) -> Self {
        Self::with_status("unavailable", pool)
    }

    fn with_status(status: &str, pool: Option<PoolStatus>) -> Self {
        Self {
            status: status.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            pool,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStats;
    use serde_json::Value;

    #[test]
    fn test_submit_response_serialize() {
        let json = serde_json::to_string(&SubmitResponse::new("abc123")).unwrap();
        assert_eq!(json, r#"{"digest":"abc123"}"#);
    }

    #[test]
    fn test_fetch_response_serialize() {
        let json = serde_json::to_string(&FetchResponse::new("hello")).unwrap();
        assert_eq!(json, r#"{"message":"hello"}"#);
    }

    #[test]
    fn test_stats_response_flattens_counters() {
        let stats = CacheStats::new();
        stats.record_hit();
        let resp = StatsResponse::new(stats.snapshot(), None);

        let json: Value = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["hits"], 1);
        assert_eq!(json["hit_rate"], 1.0);
        assert!(json.get("pool").is_none());
    }

    #[test]
    fn test_health_response_serialize() {
        let pool = PoolStatus {
            active: 1,
            idle: 2,
            max_active: 50,
            max_idle: 10,
        };
        let json: Value = serde_json::to_value(HealthResponse::healthy(Some(pool))).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json.get("timestamp").is_some());
        assert_eq!(json["pool"]["max_active"], 50);

        let json: Value = serde_json::to_value(HealthResponse::unavailable(None)).unwrap();
        assert_eq!(json["status"], "unavailable");
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
