//! Shared application state injected into all Axum handlers.

use std::time::Duration;

use crate::domain::BroadcastHub;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Message log and live subscribers.
    pub hub: BroadcastHub,
    /// Interval between SSE keep-alive comments, if enabled.
    pub sse_keep_alive: Option<Duration>,
}

impl AppState {
    /// Creates state around an existing hub.
    #[must_use]
    pub fn new(hub: BroadcastHub, sse_keep_alive: Option<Duration>) -> Self {
        Self {
            hub,
            sse_keep_alive,
        }
    }
}
