//! Event definitions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::error::{CoreError, Result};
use crate::format::EventLine;
use crate::level::Level;

/// Maximum length of an event label, in characters.
pub const MAX_LABEL_LEN: usize = 50;

/// Structured metadata attached to an event.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Store-assigned event identifier.
///
/// Identifiers increase monotonically and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted audit event.
///
/// Events are immutable once the store has assigned `id` and `timestamp`.
/// Listings order them by descending timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique event ID
    pub id: EventId,

    /// Authenticated actor who triggered the event, if any
    pub actor: Option<Actor>,

    /// Event severity
    pub level: Level,

    /// Machine-stable event category
    pub label: String,

    /// Free-text description
    pub message: Option<String>,

    /// Structured metadata
    pub extra: Option<Extra>,

    /// Store-assigned creation time
    pub timestamp: DateTime<Utc>,
}

impl Event {
    /// Returns the text line view of this event, including its id.
    #[must_use]
    pub fn line(&self) -> EventLine<'_> {
        EventLine::for_event(self)
    }

    /// Returns the value stored under `key` in the extra mapping.
    #[must_use]
    pub fn extra_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.as_ref().and_then(|extra| extra.get(key))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.line().fmt(f)
    }
}

/// Checks that a label is non-empty and at most `max_len` characters long.
///
/// # Errors
///
/// Returns [`CoreError::InvalidLabel`] describing the violated constraint.
///
/// # Examples
///
/// ```
/// use eventlog_core::{validate_label, MAX_LABEL_LEN};
///
/// assert!(validate_label("USER_LOGIN", MAX_LABEL_LEN).is_ok());
/// assert!(validate_label("", MAX_LABEL_LEN).is_err());
/// ```
pub fn validate_label(label: &str, max_len: usize) -> Result<()> {
    if label.trim().is_empty() {
        return Err(CoreError::InvalidLabel {
            reason: "label cannot be empty".to_string(),
        });
    }

    let len = label.chars().count();
    if len > max_len {
        return Err(CoreError::InvalidLabel {
            reason: format!("label is {len} characters long, maximum is {max_len}"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorId;
    use serde_json::json;

    fn sample_event() -> Event {
        let mut extra = Extra::new();
        extra.insert("key".to_string(), json!("value"));

        Event {
            id: EventId(3),
            actor: Some(Actor::authenticated(ActorId(1), "johndoe")),
            level: Level::Warning,
            label: "label".to_string(),
            message: Some("message".to_string()),
            extra: Some(extra),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_display_matches_line() {
        let event = sample_event();
        assert_eq!(event.to_string(), event.line().to_string());
        assert_eq!(
            event.to_string(),
            r#"0000000000000003 label (user: johndoe) - message {"key":"value"}"#
        );
    }

    #[test]
    fn test_extra_value() {
        let event = sample_event();
        assert_eq!(event.extra_value("key"), Some(&json!("value")));
        assert_eq!(event.extra_value("missing"), None);
    }

    #[test]
    fn test_validate_label() {
        assert!(validate_label("label", MAX_LABEL_LEN).is_ok());
        assert!(validate_label(&"x".repeat(MAX_LABEL_LEN), MAX_LABEL_LEN).is_ok());
        assert!(validate_label(&"x".repeat(MAX_LABEL_LEN + 1), MAX_LABEL_LEN).is_err());
        assert!(validate_label("   ", MAX_LABEL_LEN).is_err());
    }

    #[test]
    fn test_event_serialization() {
        let event = sample_event();
        let json = serde_json::to_string(&event).unwrap();

        assert!(json.contains("\"id\":3"));
        assert!(json.contains("\"level\":\"WARNING\""));
        assert!(json.contains("\"label\":\"label\""));

        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
