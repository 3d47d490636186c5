//! Message feed: publish and subscribe on one path.

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{PublishRequest, PublishResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, RelayError};
use crate::sse::subscribe_handler;

/// `POST /api/messages` — Publish a message to every subscriber.
///
/// The body is parsed as JSON whatever its `Content-Type`. A body that is
/// not a `{message, timestamp}` object is rejected before the log is
/// touched.
///
/// # Errors
///
/// Returns [`RelayError::InvalidRequest`] on a malformed payload.
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "Messages",
    summary = "Publish a message",
    description = "Appends the message to the log and pushes the full log to every open event stream.",
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Message accepted", body = PublishResponse),
        (status = 400, description = "Malformed payload", body = ErrorResponse),
    )
)]
pub async fn publish_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PublishResponse>, RelayError> {
    let req: PublishRequest = serde_json::from_slice(&body).inspect_err(|err| {
        tracing::debug!(error = %err, len = body.len(), "rejected publish payload");
    })?;

    let receipt = state.hub.publish(req.into());
    tracing::info!(
        log_len = receipt.log_len,
        delivered = receipt.delivered,
        dropped = receipt.dropped,
        "message published"
    );

    Ok(Json(PublishResponse::ok()))
}

/// Routes for `/messages` (nested under `/api`).
pub fn routes() -> Router<AppState> {
    Router::new().route("/messages", get(subscribe_handler).post(publish_handler))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{BroadcastHub, Event};

    fn state() -> (AppState, BroadcastHub) {
        let hub = BroadcastHub::new();
        (AppState::new(hub.clone(), None), hub)
    }

    #[tokio::test]
    async fn valid_payload_is_appended_and_delivered() {
        let (state, hub) = state();
        let Ok(mut sub) = hub.subscribe() else {
            panic!("hub closed");
        };
        let _ = sub.try_recv();

        let body = Bytes::from_static(br#"{"message":"hello","timestamp":1000}"#);
        let Ok(Json(resp)) = publish_handler(State(state), body).await else {
            panic!("publish rejected");
        };
        assert!(resp.success);
        assert_eq!(hub.snapshot(), vec![Event::new("hello", 1000)]);
        assert!(sub.try_recv().is_some());
    }

    #[tokio::test]
    async fn malformed_payload_leaves_log_untouched() {
        let (state, hub) = state();
        hub.publish(Event::new("kept", 1));
        let Ok(mut sub) = hub.subscribe() else {
            panic!("hub closed");
        };
        let _ = sub.try_recv();

        let payloads: [&'static [u8]; 3] = [b"not json", br#"{"message":"x"}"#, b""];
        for raw in payloads {
            let result = publish_handler(State(state.clone()), Bytes::from_static(raw)).await;
            let Err(err) = result else {
                panic!("malformed payload accepted");
            };
            assert_eq!(err.error_code(), 1001);
        }

        assert_eq!(hub.snapshot(), vec![Event::new("kept", 1)]);
        assert!(sub.try_recv().is_none());
    }
}
