//! Publish request and acknowledgement.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Event;

/// Request body for `POST /api/messages`.
///
/// Unknown fields are ignored. The timestamp is taken as given.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PublishRequest {
    /// Message text. May be empty.
    pub message: String,
    /// Epoch milliseconds chosen by the publisher.
    pub timestamp: i64,
}

impl From<PublishRequest> for Event {
    fn from(req: PublishRequest) -> Self {
        Self::new(req.message, req.timestamp)
    }
}

/// Response body for a successful publish.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublishResponse {
    /// Always `true`.
    pub success: bool,
}

impl PublishResponse {
    /// The acknowledgement returned for every accepted message.
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_browser_payload() {
        let req = serde_json::from_str::<PublishRequest>(
            r#"{"message":"gm","timestamp":1718000000000,"sender":"0xabc"}"#,
        );
        let Ok(req) = req else {
            panic!("payload rejected");
        };
        assert_eq!(Event::from(req), Event::new("gm", 1_718_000_000_000));
    }

    #[test]
    fn rejects_missing_or_mistyped_fields() {
        assert!(serde_json::from_str::<PublishRequest>(r#"{"message":"x"}"#).is_err());
        assert!(serde_json::from_str::<PublishRequest>(r#"{"timestamp":1}"#).is_err());
        assert!(
            serde_json::from_str::<PublishRequest>(r#"{"message":"x","timestamp":"1"}"#).is_err()
        );
        assert!(
            serde_json::from_str::<PublishRequest>(r#"{"message":"x","timestamp":1.5}"#).is_err()
        );
        assert!(serde_json::from_str::<PublishRequest>(r#"[1,2]"#).is_err());
    }
}
