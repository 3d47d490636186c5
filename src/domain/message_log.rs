//! Append-only, insertion-ordered history of published events.
//!
//! [`MessageLog`] is plain data: it has no lock of its own. The
//! [`super::BroadcastHub`] owns it behind the same mutex as the subscriber
//! set, which is what makes append order and snapshot delivery agree.

use super::Event;

/// In-memory log of every [`Event`] published since process start.
///
/// There is no capacity bound and nothing is ever evicted or rewritten.
#[derive(Debug, Default)]
pub struct MessageLog {
    events: Vec<Event>,
}

impl MessageLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event at the tail.
    pub fn append(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Returns an owned copy of the full log.
    ///
    /// Later appends do not affect a snapshot that was already taken.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.clone()
    }

    /// Iterates over the events in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Number of events appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing has been published yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Serialises the whole log as a compact JSON array.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`]; with string and integer
    /// fields only this does not happen in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.events)
    }
}

impl<'a> IntoIterator for &'a MessageLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_log_is_empty() {
        let log = MessageLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert_eq!(log.to_json().ok().as_deref(), Some("[]"));
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut log = MessageLog::new();
        log.append(Event::new("a", 3));
        log.append(Event::new("b", 1));
        log.append(Event::new("c", 2));

        let messages: Vec<&str> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["a", "b", "c"]);
    }

    #[test]
    fn snapshot_is_not_affected_by_later_appends() {
        let mut log = MessageLog::new();
        log.append(Event::new("first", 1));
        let snap = log.snapshot();
        log.append(Event::new("second", 2));

        assert_eq!(snap, vec![Event::new("first", 1)]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn duplicates_and_empty_messages_are_kept() {
        let mut log = MessageLog::new();
        log.append(Event::new("", 5));
        log.append(Event::new("", 5));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn to_json_uses_wire_field_order() {
        let mut log = MessageLog::new();
        log.append(Event::new("hello", 1000));
        log.append(Event::new("world", 2000));

        assert_eq!(
            log.to_json().ok().as_deref(),
            Some(
                r#"[{"message":"hello","timestamp":1000},{"message":"world","timestamp":2000}]"#
            )
        );
    }
}
