//! Fan-out of the full message log to every open subscriber.
//!
//! [`BroadcastHub`] keeps the [`MessageLog`] and the active subscriber set
//! behind a single [`parking_lot::Mutex`]. Appending, snapshotting for a new
//! subscriber and enqueueing frames all happen inside that one critical
//! section, so every subscriber observes the same global order and a new
//! subscriber's first frame is always its registration snapshot.
//!
//! Enqueueing is a non-blocking send on an unbounded
//! [`tokio::sync::mpsc`] channel; the lock is never held across an await.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::{Event, Frame, MessageLog, SubscriberId};

/// Sending half of one subscriber's push connection.
///
/// Created when a subscribe request arrives and dropped by the hub when the
/// subscriber is unregistered or its receiving half has gone away.
#[derive(Debug)]
pub struct SubscriberChannel {
    id: SubscriberId,
    sender: mpsc::UnboundedSender<Frame>,
}

/// Returned by [`SubscriberChannel::enqueue`] when the remote side is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("subscriber {0} is no longer receiving")]
pub struct DeliveryFailed(pub SubscriberId);

impl SubscriberChannel {
    /// Wraps an existing sender under a fresh identity.
    #[must_use]
    pub fn new(sender: mpsc::UnboundedSender<Frame>) -> Self {
        Self {
            id: SubscriberId::new(),
            sender,
        }
    }

    /// Creates a channel together with the receiver its frames arrive on.
    #[must_use]
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<Frame>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }

    /// Identity of this channel inside the hub.
    #[must_use]
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// Returns `true` once the receiving half has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Queues a frame for delivery.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryFailed`] if the receiving half has been dropped.
    pub fn enqueue(&self, frame: Frame) -> Result<(), DeliveryFailed> {
        self.sender.send(frame).map_err(|_| DeliveryFailed(self.id))
    }
}

/// Why a channel could not be registered.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    /// The hub has been shut down with [`BroadcastHub::close`].
    #[error("broadcast hub is shut down")]
    Closed,
    /// The current log could not be rendered as the first frame.
    #[error("failed to render snapshot: {0}")]
    Render(#[from] serde_json::Error),
}

/// Outcome of a single [`BroadcastHub::publish`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishReceipt {
    /// Length of the log after the append.
    pub log_len: usize,
    /// Subscribers the new snapshot was queued for.
    pub delivered: usize,
    /// Subscribers found closed during delivery and unregistered.
    pub dropped: usize,
}

#[derive(Debug, Default)]
struct HubState {
    log: MessageLog,
    subscribers: HashMap<SubscriberId, SubscriberChannel>,
    closed: bool,
}

/// Shared handle to the message log and its live subscribers.
///
/// Cheap to clone; all clones refer to the same state.
#[derive(Debug, Clone, Default)]
pub struct BroadcastHub {
    state: Arc<Mutex<HubState>>,
}

impl BroadcastHub {
    /// Creates a hub with an empty log and no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `channel` to the active set and queues the current snapshot on
    /// it as its first frame.
    ///
    /// Returns the snapshot that was queued. If the channel is already
    /// closed it is not added.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::Closed`] after [`BroadcastHub::close`] and
    /// [`RegisterError::Render`] if the snapshot cannot be serialised. In
    /// both cases the channel is dropped without receiving anything.
    pub fn register(&self, channel: SubscriberChannel) -> Result<Vec<Event>, RegisterError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(RegisterError::Closed);
        }
        let snapshot = state.log.snapshot();
        let id = channel.id();

        let frame = Frame::from_log(&state.log).inspect_err(|err| {
            tracing::error!(subscriber = %id, error = %err, "failed to render snapshot");
        })?;
        if channel.enqueue(frame).is_err() {
            tracing::debug!(subscriber = %id, "channel closed before registration");
            return Ok(snapshot);
        }

        if state.subscribers.insert(id, channel).is_some() {
            tracing::warn!(subscriber = %id, "subscriber registered twice");
        }
        tracing::debug!(
            subscriber = %id,
            active = state.subscribers.len(),
            snapshot_len = snapshot.len(),
            "subscriber registered"
        );
        Ok(snapshot)
    }

    /// Opens a new subscription whose first item is the current snapshot.
    ///
    /// The returned guard unregisters itself when dropped.
    ///
    /// # Errors
    ///
    /// Propagates the [`RegisterError`] from [`BroadcastHub::register`].
    pub fn subscribe(&self) -> Result<Subscription, RegisterError> {
        let (channel, receiver) = SubscriberChannel::pair();
        let id = channel.id();
        self.register(channel)?;
        Ok(Subscription {
            id,
            receiver,
            hub: self.clone(),
        })
    }

    /// Removes a subscriber from the active set.
    ///
    /// Unknown or already removed identities are a no-op. Returns whether a
    /// channel was actually removed.
    pub fn unregister(&self, id: SubscriberId) -> bool {
        let mut state = self.state.lock();
        let removed = state.subscribers.remove(&id).is_some();
        if removed {
            tracing::debug!(
                subscriber = %id,
                active = state.subscribers.len(),
                "subscriber unregistered"
            );
        }
        removed
    }

    /// Appends `event` and queues the resulting full log on every active
    /// subscriber.
    ///
    /// Subscribers whose receiver is gone are unregistered on the way;
    /// their failure never reaches the publisher or other subscribers.
    pub fn publish(&self, event: Event) -> PublishReceipt {
        let mut state = self.state.lock();
        state.log.append(event);
        let log_len = state.log.len();

        let frame = match Frame::from_log(&state.log) {
            Ok(frame) => frame,
            Err(err) => {
                tracing::error!(error = %err, log_len, "failed to render log");
                return PublishReceipt {
                    log_len,
                    delivered: 0,
                    dropped: 0,
                };
            }
        };

        let before = state.subscribers.len();
        state
            .subscribers
            .retain(|_, channel| match channel.enqueue(frame.clone()) {
                Ok(()) => true,
                Err(err) => {
                    tracing::debug!(error = %err, "dropping subscriber");
                    false
                }
            });
        let delivered = state.subscribers.len();
        let dropped = before - delivered;

        tracing::debug!(log_len, delivered, dropped, "published");
        PublishReceipt {
            log_len,
            delivered,
            dropped,
        }
    }

    /// Refuses new subscribers and drops every registered channel, which
    /// ends their streams. Publishing keeps appending to the log.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        let released = state.subscribers.len();
        state.subscribers.clear();
        tracing::info!(released, "broadcast hub closed");
    }

    /// Returns `true` once [`BroadcastHub::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Returns a copy of the current log.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Event> {
        self.state.lock().log.snapshot()
    }

    /// Number of events published so far.
    #[must_use]
    pub fn log_len(&self) -> usize {
        self.state.lock().log.len()
    }

    /// Number of currently registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }
}

/// Receiving half of a registered subscriber.
///
/// Yields one [`Frame`] per update, starting with the registration
/// snapshot. Dropping it unregisters the subscriber. The stream ends if the
/// hub unregisters the subscriber first.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    receiver: mpsc::UnboundedReceiver<Frame>,
    hub: BroadcastHub,
}

impl Subscription {
    /// Identity of this subscriber inside the hub.
    #[must_use]
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// Waits for the next frame. Returns `None` once unregistered.
    pub async fn recv(&mut self) -> Option<Frame> {
        self.receiver.recv().await
    }

    /// Returns the next frame if one is already queued.
    pub fn try_recv(&mut self) -> Option<Frame> {
        self.receiver.try_recv().ok()
    }
}

impl Stream for Subscription {
    type Item = Frame;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.unregister(self.id);
    }
}
