//! Configuration for the event recorder.

use eventlog_core::MAX_LABEL_LEN;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a [`RecorderConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("Failed to parse recorder config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value is out of range.
    #[error("Invalid recorder config: {reason}")]
    Invalid {
        /// Reason the configuration is invalid.
        reason: String,
    },
}

/// Configuration for an [`EventRecorder`](crate::EventRecorder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Whether events are mirrored to the log sink when the request does not
    /// say otherwise.
    pub emit_to_log: bool,

    /// Maximum label length, in characters.
    pub max_label_len: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            emit_to_log: true,
            max_label_len: MAX_LABEL_LEN,
        }
    }
}

impl RecorderConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether events are mirrored to the log sink by default.
    #[must_use]
    pub const fn with_emit_to_log(mut self, emit_to_log: bool) -> Self {
        self.emit_to_log = emit_to_log;
        self
    }

    /// Sets the maximum label length.
    #[must_use]
    pub const fn with_max_label_len(mut self, max_label_len: usize) -> Self {
        self.max_label_len = max_label_len;
        self
    }

    /// Parses a configuration from YAML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML and
    /// [`ConfigError::Invalid`] if a value is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventlog_recorder::RecorderConfig;
    ///
    /// let config = RecorderConfig::from_yaml("emit_to_log: false").unwrap();
    /// assert!(!config.emit_to_log);
    /// assert_eq!(config.max_label_len, 50);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `max_label_len` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_label_len == 0 {
            return Err(ConfigError::Invalid {
                reason: "max_label_len must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RecorderConfig::default();
        assert!(config.emit_to_log);
        assert_eq!(config.max_label_len, 50);
    }

    #[test]
    fn test_builder() {
        let config = RecorderConfig::new()
            .with_emit_to_log(false)
            .with_max_label_len(20);
        assert!(!config.emit_to_log);
        assert_eq!(config.max_label_len, 20);
    }

    #[test]
    fn test_from_yaml() {
        let config = RecorderConfig::from_yaml("emit_to_log: false\nmax_label_len: 64\n").unwrap();
        assert_eq!(
            config,
            RecorderConfig::new()
                .with_emit_to_log(false)
                .with_max_label_len(64)
        );
    }

    #[test]
    fn test_from_yaml_rejects_zero_label_len() {
        let err = RecorderConfig::from_yaml("max_label_len: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_from_yaml_rejects_malformed_input() {
        let err = RecorderConfig::from_yaml("emit_to_log: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
