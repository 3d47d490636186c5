//! Serialised log snapshot queued for delivery.

use std::sync::Arc;

use super::MessageLog;

/// One push update: the whole log rendered as a compact JSON array.
///
/// Serialised once per publish and shared by every subscriber, so cloning
/// a `Frame` is a reference-count bump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(Arc<str>);

impl Frame {
    /// Renders the current contents of `log`.
    ///
    /// # Errors
    ///
    /// Propagates the [`serde_json::Error`] from [`MessageLog::to_json`].
    pub fn from_log(log: &MessageLog) -> Result<Self, serde_json::Error> {
        log.to_json().map(|json| Self(Arc::from(json)))
    }

    /// The JSON array carried by this frame.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.0
    }
}
