//! System endpoints: health check and relay statistics.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{HealthResponse, StatsResponse};
use crate::app_state::AppState;

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let status = if state.hub.is_closed() {
        "draining"
    } else {
        "healthy"
    };
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /api/stats` — Log length and open stream count.
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "System",
    summary = "Relay statistics",
    description = "Returns the number of logged messages and currently open event streams.",
    responses(
        (status = 200, description = "Current counters", body = StatsResponse),
    )
)]
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        messages: state.hub.log_len(),
        subscribers: state.hub.subscriber_count(),
    })
}

/// System routes mounted at the root level (not under `/api`).
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}

/// System routes nested under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/stats", get(stats_handler))
}
