//! Actor types.
//!
//! Actors are owned by the host's identity subsystem. Events only reference
//! them, so this module defines the reference forms a caller may pass in
//! ([`ActorRef`]) and the resolved form stored with an event ([`Actor`]).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an actor in the identity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A resolved actor as supplied by the identity subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Identity store key.
    pub id: ActorId,

    /// Human-readable name used in formatted event lines.
    pub display_name: String,

    /// Whether the actor is currently authenticated.
    pub authenticated: bool,
}

impl Actor {
    /// Creates an authenticated actor.
    #[must_use]
    pub fn authenticated(id: ActorId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            authenticated: true,
        }
    }

    /// Creates an actor that is known but not authenticated.
    ///
    /// Such actors are never attached to an event.
    #[must_use]
    pub fn anonymous(id: ActorId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            authenticated: false,
        }
    }
}

/// The actor argument accepted by the recorder.
///
/// Callers may hand over an actor they already hold, only its identifier, or
/// nothing at all. The resolver turns every form into `Option<Actor>`.
///
/// # Examples
///
/// ```rust
/// use eventlog_core::{Actor, ActorId, ActorRef};
///
/// assert_eq!(ActorRef::from(42), ActorRef::Id(ActorId(42)));
/// assert_eq!(ActorRef::from(None::<Actor>), ActorRef::Absent);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActorRef {
    /// An actor object already loaded by the caller.
    Resolved(Actor),

    /// A raw identifier that must be looked up.
    Id(ActorId),

    /// No actor.
    #[default]
    Absent,
}

impl ActorRef {
    /// Returns `true` if no actor was supplied.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<Actor> for ActorRef {
    fn from(actor: Actor) -> Self {
        Self::Resolved(actor)
    }
}

impl From<&Actor> for ActorRef {
    fn from(actor: &Actor) -> Self {
        Self::Resolved(actor.clone())
    }
}

impl From<ActorId> for ActorRef {
    fn from(id: ActorId) -> Self {
        Self::Id(id)
    }
}

impl From<u64> for ActorRef {
    fn from(id: u64) -> Self {
        Self::Id(ActorId(id))
    }
}

impl<T: Into<Self>> From<Option<T>> for ActorRef {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}
