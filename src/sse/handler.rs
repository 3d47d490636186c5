//! Axum handler that opens an event stream.

use axum::extract::State;
use axum::response::sse::{KeepAlive, Sse};
use axum::response::{IntoResponse, Response};

use super::stream::{event_stream, stream_headers};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, RelayError};

/// `GET /api/messages` — Subscribe to the live message feed.
///
/// The first event is the full log at connection time; each later event is
/// the full log after one publish.
///
/// # Errors
///
/// Returns [`RelayError::StreamUnavailable`] while the relay is shutting
/// down and [`RelayError::Internal`] if the first snapshot cannot be
/// rendered.
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "Messages",
    summary = "Subscribe to the message feed",
    description = "Opens a Server-Sent Events stream. Every event carries `data: <JSON array of all messages>`; the first one is sent immediately.",
    responses(
        (status = 200, description = "Event stream of full message snapshots", content_type = "text/event-stream", body = [crate::domain::Event]),
        (status = 500, description = "Snapshot could not be rendered", body = ErrorResponse),
        (status = 503, description = "Relay is shutting down", body = ErrorResponse),
    )
)]
pub async fn subscribe_handler(State(state): State<AppState>) -> Result<Response, RelayError> {
    let subscription = state.hub.subscribe()?;
    tracing::info!(subscriber = %subscription.id(), "event stream opened");

    let sse = Sse::new(event_stream(subscription));
    Ok(match state.sse_keep_alive {
        Some(interval) => (
            stream_headers(),
            sse.keep_alive(KeepAlive::new().interval(interval)),
        )
            .into_response(),
        None => (stream_headers(), sse).into_response(),
    })
}
