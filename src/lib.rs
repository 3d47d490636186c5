//! # relay-feed
//!
//! In-memory publish/subscribe relay that streams the full message history
//! to every connected viewer over Server-Sent Events.
//!
//! Publishers `POST /api/messages` with `{"message": .., "timestamp": ..}`.
//! Subscribers `GET /api/messages` and receive, as `data:` events, the whole
//! log: once on connect, then again after every publish.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP POST, EventSource)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── SSE Handler (sse/)
//!     │
//!     ├── BroadcastHub (domain/)   one mutex over log + subscribers
//!     │
//!     └── MessageLog (domain/)     append-only, in memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod sse;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::config::RelayConfig;

/// Builds the full application: every route plus the HTTP middleware stack.
///
/// The timeout only bounds how long a handler takes to return its response
/// head, so open event streams live for as long as the client stays
/// connected.
pub fn build_app(state: AppState, config: &RelayConfig) -> Router {
    let cors = if config.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    api::build_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    config.request_timeout,
                ))
                .layer(cors),
        )
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}
