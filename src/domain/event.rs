//! A single published feed entry.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One published message as it is stored in the [`super::MessageLog`] and
/// sent to subscribers.
///
/// The timestamp is supplied by the publisher (epoch milliseconds) and is
/// neither validated nor corrected. Empty messages and duplicates are
/// accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Message text.
    pub message: String,
    /// Caller-supplied epoch milliseconds.
    pub timestamp: i64,
}

impl Event {
    /// Creates a new `Event`.
    #[must_use]
    pub fn new(message: impl Into<String>, timestamp: i64) -> Self {
        Self {
            message: message.into(),
            timestamp,
        }
    }
}
