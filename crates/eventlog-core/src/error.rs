//! Error types for eventlog core operations.

use thiserror::Error;

/// Result type alias using [`CoreError`] as the error type.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when building or decoding core types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Event label failed validation.
    #[error("Invalid event label: {reason}")]
    InvalidLabel {
        /// Reason the label was rejected.
        reason: String,
    },

    /// A severity name or numeric code did not match any level.
    #[error("Unknown event level: {0}")]
    UnknownLevel(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
