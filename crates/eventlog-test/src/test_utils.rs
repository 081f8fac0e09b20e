//! Assertion helpers for recorded events.

use std::io;
use std::sync::Arc;

use eventlog_core::{Event, Extra, Level};
use eventlog_recorder::{EventRequest, InMemorySink};
use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Writer that appends formatted `tracing` output to a shared buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Returns everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` under a plain-text `tracing` subscriber and returns its output.
///
/// `filter` uses `EnvFilter` directive syntax, e.g. `"eventlog=info"`.
///
/// # Examples
///
/// ```rust
/// use eventlog_test::capture_tracing;
///
/// let output = capture_tracing("eventlog=info", || {
///     tracing::info!(target: "eventlog", "0000000000000001 label");
///     tracing::debug!(target: "eventlog", "hidden");
/// });
/// assert!(output.contains("0000000000000001 label"));
/// assert!(!output.contains("hidden"));
/// ```
pub fn capture_tracing(filter: &str, f: impl FnOnce()) -> String {
    let buffer = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_ansi(false)
        .without_time()
        .with_writer(buffer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

/// Builds an extra mapping from string pairs.
///
/// # Examples
///
/// ```rust
/// use eventlog_test::extra_from;
///
/// let extra = extra_from(&[("key", "value")]);
/// assert_eq!(extra["key"], "value");
/// ```
#[must_use]
pub fn extra_from(pairs: &[(&str, &str)]) -> Extra {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), serde_json::Value::from(*value)))
        .collect()
}

/// Asserts that the sink captured exactly the given lines, in order.
///
/// # Panics
///
/// Panics if the captured lines differ.
#[track_caller]
pub fn assert_lines(sink: &InMemorySink, expected: &[&str]) {
    let lines = sink.lines();
    assert_eq!(
        lines, expected,
        "Captured log lines differ from expectation"
    );
}

/// Asserts that an event echoes the request it was recorded from.
///
/// The actor is compared by display name, since resolution may have replaced
/// an id with the stored actor. `expected_actor` is `None` when the actor is
/// expected to have been dropped.
///
/// # Panics
///
/// Panics if any field differs.
#[track_caller]
pub fn assert_echoes(
    event: &Event,
    request: &EventRequest,
    level: Level,
    expected_actor: Option<&str>,
) {
    assert_eq!(event.label, request.label, "label mismatch");
    assert_eq!(event.message, request.message, "message mismatch");
    assert_eq!(event.extra, request.extra, "extra mismatch");
    assert_eq!(event.level, level, "level mismatch");
    assert_eq!(
        event.actor.as_ref().map(|actor| actor.display_name.as_str()),
        expected_actor,
        "actor mismatch"
    );
}
