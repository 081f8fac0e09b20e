//! Single-line rendering of events.
//!
//! Every event renders as
//!
//! ```text
//! <id> <label>[ (user: <name>)][ - <message>][ <extra>]
//! ```
//!
//! where the id is zero-padded to [`ID_WIDTH`] digits and `extra` is compact
//! JSON. Lines written on the fatal path may not have an id yet and omit that
//! segment entirely.
//!
//! Control characters in the label, actor name and message are written as
//! escapes (`\n`, `\t`, `\u{1b}`), so a rendered event is always one line.

use std::fmt::{self, Write};

use crate::actor::Actor;
use crate::event::{Event, EventId, Extra};

/// Minimum number of digits used to display an event id.
pub const ID_WIDTH: usize = 16;

/// Borrowed view over the parts of an event that appear in its text line.
#[derive(Debug, Clone, Copy)]
pub struct EventLine<'a> {
    id: Option<EventId>,
    label: &'a str,
    actor: Option<&'a Actor>,
    message: Option<&'a str>,
    extra: Option<&'a Extra>,
}

impl<'a> EventLine<'a> {
    /// Creates the line for a persisted event.
    #[must_use]
    pub fn for_event(event: &'a Event) -> Self {
        Self {
            id: Some(event.id),
            label: &event.label,
            actor: event.actor.as_ref(),
            message: event.message.as_deref(),
            extra: event.extra.as_ref(),
        }
    }

    /// Creates a line that has no id segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventlog_core::EventLine;
    ///
    /// let line = EventLine::without_id("shutdown", None, Some("disk full"), None);
    /// assert_eq!(line.to_string(), "shutdown - disk full");
    /// ```
    #[must_use]
    pub const fn without_id(
        label: &'a str,
        actor: Option<&'a Actor>,
        message: Option<&'a str>,
        extra: Option<&'a Extra>,
    ) -> Self {
        Self {
            id: None,
            label,
            actor,
            message,
            extra,
        }
    }
}

impl fmt::Display for EventLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = self.id {
            write!(f, "{:0width$} ", id.0, width = ID_WIDTH)?;
        }

        write_escaped(f, self.label)?;

        if let Some(actor) = self.actor {
            f.write_str(" (user: ")?;
            write_escaped(f, &actor.display_name)?;
            f.write_char(')')?;
        }

        if let Some(message) = self.message.filter(|m| !m.is_empty()) {
            f.write_str(" - ")?;
            write_escaped(f, message)?;
        }

        if let Some(extra) = self.extra.filter(|e| !e.is_empty()) {
            let json = serde_json::to_string(extra).map_err(|_| fmt::Error)?;
            write!(f, " {json}")?;
        }

        Ok(())
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for ch in text.chars() {
        if ch.is_control() {
            write!(f, "{}", ch.escape_default())?;
        } else {
            f.write_char(ch)?;
        }
    }
    Ok(())
}
