//! Event severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Severity of an event.
///
/// Levels are totally ordered: `Debug < Info < Warning < Error < Critical`.
/// The same enum is persisted with the event and used by log sinks to decide
/// whether the mirrored line is emitted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Diagnostic detail, usually suppressed by sinks
    Debug,
    /// Normal operational event
    #[default]
    Info,
    /// Something unexpected that was recovered from
    Warning,
    /// An operation failed
    Error,
    /// The process or a subsystem cannot continue
    Critical,
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    /// Returns the upper-case name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Returns the conventional numeric code for the level.
    ///
    /// Stores that keep the level in an integer column use these values.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventlog_core::Level;
    ///
    /// assert_eq!(Level::Warning.code(), 30);
    /// ```
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Debug => 10,
            Self::Info => 20,
            Self::Warning => 30,
            Self::Error => 40,
            Self::Critical => 50,
        }
    }

    /// Converts a numeric code back into a level.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownLevel`] if the code is not one of the
    /// values produced by [`Level::code`].
    pub fn from_code(code: u8) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|level| level.code() == code)
            .ok_or_else(|| CoreError::UnknownLevel(code.to_string()))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" | "FATAL" => Ok(Self::Critical),
            _ => Err(CoreError::UnknownLevel(s.to_string())),
        }
    }
}
