//! Actor resolution.

use std::sync::Arc;

use eventlog_core::{Actor, ActorId, ActorRef};
use tracing::debug;

use crate::store::{IdentityStore, LookupError};

/// Outcome of resolving an [`ActorRef`].
#[derive(Debug)]
pub enum Resolution {
    /// An authenticated actor to attach to the event.
    Actor(Actor),

    /// No actor: none was given, or the given actor is unauthenticated.
    NoActor,

    /// The identifier could not be resolved. The event is recorded without
    /// an actor and the failure is reported separately.
    Unresolved {
        /// Identifier supplied by the caller.
        id: ActorId,
        /// Why the lookup failed.
        error: LookupError,
    },
}

impl Resolution {
    /// Returns the resolved actor, if any.
    #[must_use]
    pub fn into_actor(self) -> Option<Actor> {
        match self {
            Self::Actor(actor) => Some(actor),
            Self::NoActor | Self::Unresolved { .. } => None,
        }
    }
}

/// Normalizes actor references into authenticated actors.
#[derive(Debug, Clone)]
pub struct ActorResolver {
    identities: Arc<dyn IdentityStore>,
}

impl ActorResolver {
    /// Creates a resolver backed by the given identity store.
    #[must_use]
    pub fn new(identities: Arc<dyn IdentityStore>) -> Self {
        Self { identities }
    }

    /// Resolves an actor reference.
    ///
    /// Raw ids are looked up; unauthenticated actors, whether passed in or
    /// looked up, resolve to [`Resolution::NoActor`].
    #[must_use]
    pub fn resolve(&self, actor: &ActorRef) -> Resolution {
        let actor = match actor {
            ActorRef::Absent => return Resolution::NoActor,
            ActorRef::Resolved(actor) => actor.clone(),
            ActorRef::Id(id) => match self.identities.lookup_actor(*id) {
                Ok(actor) => actor,
                Err(error) => {
                    debug!(actor_id = %id, %error, "Could not resolve actor id");
                    return Resolution::Unresolved { id: *id, error };
                }
            },
        };

        if actor.authenticated {
            Resolution::Actor(actor)
        } else {
            debug!(actor_id = %actor.id, "Actor is not authenticated, dropping");
            Resolution::NoActor
        }
    }
}
