//! Log sinks that receive mirrored event lines.

use std::fmt::Debug;

use eventlog_core::Level;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

/// Tracing target used by [`TracingSink`].
pub const LOG_TARGET: &str = "eventlog";

/// Destination for formatted event lines.
///
/// The sink owns its level threshold and silently drops lines below it. The
/// recorder never inspects or changes that threshold.
pub trait LogSink: Send + Sync + Debug {
    /// Emits a formatted event line at the given level.
    fn emit(&self, level: Level, line: &str);

    /// Returns the sink name for identification.
    fn name(&self) -> &'static str;
}

/// Sink that forwards lines to the `tracing` ecosystem.
///
/// Lines are emitted under the [`LOG_TARGET`] target, so hosts control
/// gating with their subscriber's filter (e.g. `eventlog=info`).
/// `tracing` has no level above `ERROR`; critical lines are emitted at
/// `ERROR` with a `severity = "CRITICAL"` field.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Creates a new tracing sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn emit(&self, level: Level, line: &str) {
        match level {
            Level::Debug => debug!(target: LOG_TARGET, "{line}"),
            Level::Info => info!(target: LOG_TARGET, "{line}"),
            Level::Warning => warn!(target: LOG_TARGET, "{line}"),
            Level::Error => error!(target: LOG_TARGET, "{line}"),
            Level::Critical => error!(target: LOG_TARGET, severity = "CRITICAL", "{line}"),
        }
    }

    fn name(&self) -> &'static str {
        "tracing"
    }
}

/// Sink that keeps emitted lines in memory.
#[derive(Debug)]
pub struct InMemorySink {
    min_level: Level,
    lines: Mutex<Vec<(Level, String)>>,
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySink {
    /// Creates a sink that accepts every level.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_threshold(Level::Debug)
    }

    /// Creates a sink that drops lines below `min_level`.
    #[must_use]
    pub const fn with_threshold(min_level: Level) -> Self {
        Self {
            min_level,
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Returns the configured threshold.
    #[must_use]
    pub const fn threshold(&self) -> Level {
        self.min_level
    }

    /// Returns all captured entries with their levels.
    #[must_use]
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.lines.lock().clone()
    }

    /// Returns all captured lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().iter().map(|(_, line)| line.clone()).collect()
    }

    /// Clears all captured lines.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl LogSink for InMemorySink {
    fn emit(&self, level: Level, line: &str) {
        if level < self.min_level {
            return;
        }
        self.lines.lock().push((level, line.to_string()));
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}
