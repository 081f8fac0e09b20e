//! Persistence and identity collaborators.

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use eventlog_core::{Actor, ActorId, EventId, Extra, Level};
use thiserror::Error;

/// Row handed to an [`EventStore`] for insertion.
#[derive(Debug, Clone, Copy)]
pub struct NewEvent<'a> {
    /// Event category
    pub label: &'a str,
    /// Free-text description
    pub message: Option<&'a str>,
    /// Resolved, authenticated actor
    pub actor: Option<&'a Actor>,
    /// Event severity
    pub level: Level,
    /// Structured metadata
    pub extra: Option<&'a Extra>,
}

/// Values assigned by the store when a row is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inserted {
    /// Unique, monotonically increasing id
    pub id: EventId,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

/// Append-mostly store that persists events.
///
/// Implementations must assign ids atomically; concurrent callers may
/// insert through the same store.
pub trait EventStore: Send + Sync + Debug {
    /// Inserts a new event row.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the row or is unreachable.
    fn insert(&self, event: &NewEvent<'_>) -> Result<Inserted, StoreError>;

    /// Returns the store name for identification.
    fn name(&self) -> &'static str;
}

/// Identity subsystem that resolves actor ids.
pub trait IdentityStore: Send + Sync + Debug {
    /// Looks up an actor by id.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] for unknown ids and
    /// [`LookupError::Unavailable`] if the lookup could not be performed.
    fn lookup_actor(&self, id: ActorId) -> Result<Actor, LookupError>;
}

/// Errors raised by an [`EventStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the row.
    #[error("Store rejected event: {0}")]
    Rejected(String),

    /// A stored row could not be turned back into an event.
    #[error("Failed to decode stored event: {0}")]
    Decode(String),

    /// Stored data could not be encoded or decoded.
    #[error("Failed to serialize event data: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised by an [`IdentityStore`].
#[derive(Debug, Error)]
pub enum LookupError {
    /// No actor has the given id.
    #[error("User matching id {0} does not exist")]
    NotFound(ActorId),

    /// The identity store could not answer.
    #[error("Identity store unavailable: {0}")]
    Unavailable(String),
}
