//! Domain layer: the message log and the broadcast hub built around it.
//!
//! Everything here is transport-agnostic. The SSE adapter in
//! [`crate::sse`] only consumes [`Subscription`]s and [`Frame`]s.

pub mod broadcast_hub;
pub mod event;
pub mod frame;
pub mod message_log;
pub mod subscriber_id;

pub use broadcast_hub::{
    BroadcastHub, DeliveryFailed, PublishReceipt, RegisterError, SubscriberChannel, Subscription,
};
pub use event::Event;
pub use frame::Frame;
pub use message_log::MessageLog;
pub use subscriber_id::SubscriberId;
