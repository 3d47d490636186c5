//! Server-Sent Events transport for the subscribe side of the relay.
//!
//! `GET /api/messages` opens a long-lived `text/event-stream` response.
//! Every [`crate::domain::Frame`] queued for the subscriber becomes one
//! `data: <json array>\n\n` event.

pub mod handler;
pub mod stream;

pub use handler::subscribe_handler;
pub use stream::{event_stream, stream_headers};
