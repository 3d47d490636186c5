//! Conversion from a hub [`Subscription`] to an SSE event stream.

use std::convert::Infallible;

use axum::http::header::{self, HeaderName, HeaderValue};
use axum::response::sse::Event as SseEvent;
use futures_util::{Stream, StreamExt};

use crate::domain::Subscription;

/// Extra response headers for an event stream.
///
/// Axum sets `Content-Type: text/event-stream` itself; these override its
/// `Cache-Control` and stop intermediaries from buffering or transforming
/// the body.
#[must_use]
pub fn stream_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-transform"),
        ),
        (header::CONNECTION, HeaderValue::from_static("keep-alive")),
        (
            HeaderName::from_static("x-accel-buffering"),
            HeaderValue::from_static("no"),
        ),
    ]
}

/// Maps each queued frame to one SSE `data` event.
///
/// The subscription moves into the stream, so dropping the response body
/// (client disconnect) unregisters the subscriber.
pub fn event_stream(
    subscription: Subscription,
) -> impl Stream<Item = Result<SseEvent, Infallible>> + Send + 'static {
    subscription.map(|frame| Ok(SseEvent::default().data(frame.data())))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{BroadcastHub, Event};
    use tokio_test::{assert_pending, assert_ready};

    #[test]
    fn headers_disable_caching_and_buffering() {
        let headers = stream_headers();
        let lookup = |name: &HeaderName| {
            headers
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(
            lookup(&header::CACHE_CONTROL),
            Some(HeaderValue::from_static("no-cache, no-transform"))
        );
        assert_eq!(
            lookup(&header::CONNECTION),
            Some(HeaderValue::from_static("keep-alive"))
        );
    }

    #[test]
    fn yields_snapshot_then_waits_for_publish() {
        let hub = BroadcastHub::new();
        let Ok(subscription) = hub.subscribe() else {
            panic!("hub closed");
        };
        let mut stream = tokio_test::task::spawn(event_stream(subscription));

        assert!(matches!(assert_ready!(stream.poll_next()), Some(Ok(_))));
        assert_pending!(stream.poll_next());

        hub.publish(Event::new("x", 3000));
        assert!(stream.is_woken());
        assert!(matches!(assert_ready!(stream.poll_next()), Some(Ok(_))));
    }

    #[test]
    fn dropping_stream_unregisters_subscriber() {
        let hub = BroadcastHub::new();
        let Ok(subscription) = hub.subscribe() else {
            panic!("hub closed");
        };
        let stream = event_stream(subscription);
        assert_eq!(hub.subscriber_count(), 1);
        drop(stream);
        assert_eq!(hub.subscriber_count(), 0);
    }
}
