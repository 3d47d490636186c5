//! Health and statistics responses.

use serde::Serialize;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `"healthy"` while accepting streams, `"draining"` after shutdown began.
    pub status: String,
    /// Current server time (RFC 3339).
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}

/// Relay statistics.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    /// Number of messages in the log.
    pub messages: usize,
    /// Number of open event streams.
    pub subscribers: usize,
}
