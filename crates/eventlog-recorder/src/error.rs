//! Error types for event recording.

use eventlog_core::CoreError;
use thiserror::Error;

use crate::store::StoreError;

/// Result type alias using [`RecordError`] as the error type.
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors returned by [`EventRecorder`](crate::EventRecorder) operations.
#[derive(Error, Debug)]
pub enum RecordError {
    /// The store could not persist the event.
    #[error("Failed to persist event: {0}")]
    Persistence(#[from] StoreError),

    /// The request was rejected before reaching the store.
    #[error(transparent)]
    InvalidRequest(#[from] CoreError),
}

impl RecordError {
    /// Returns `true` if the error came from the store.
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}
