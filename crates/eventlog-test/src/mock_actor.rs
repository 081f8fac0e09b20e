//! Mock actor builders.

use eventlog_core::{Actor, ActorId};

/// Builder for mock actors.
///
/// # Examples
///
/// ```rust
/// use eventlog_test::MockActor;
///
/// let actor = MockActor::new(7, "hello").build();
/// assert!(actor.authenticated);
///
/// let visitor = MockActor::new(8, "visitor").unauthenticated().build();
/// assert!(!visitor.authenticated);
/// ```
#[derive(Debug, Clone)]
pub struct MockActor {
    id: u64,
    display_name: String,
    authenticated: bool,
}

impl MockActor {
    /// Creates an authenticated mock actor.
    #[must_use]
    pub fn new(id: u64, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            authenticated: true,
        }
    }

    /// Creates the default test user, id 1 named "johndoe".
    #[must_use]
    pub fn johndoe() -> Actor {
        Self::new(1, "johndoe").build()
    }

    /// Creates a logged-out actor, id 2 named "guest".
    #[must_use]
    pub fn guest() -> Actor {
        Self::new(2, "guest").unauthenticated().build()
    }

    /// Marks the actor as not authenticated.
    #[must_use]
    pub const fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// Builds the [`Actor`].
    #[must_use]
    pub fn build(self) -> Actor {
        Actor {
            id: ActorId(self.id),
            display_name: self.display_name,
            authenticated: self.authenticated,
        }
    }
}

impl From<MockActor> for Actor {
    fn from(mock: MockActor) -> Self {
        mock.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let johndoe = MockActor::johndoe();
        assert_eq!(johndoe.id, ActorId(1));
        assert!(johndoe.authenticated);

        let guest = MockActor::guest();
        assert_eq!(guest.display_name, "guest");
        assert!(!guest.authenticated);
    }

    #[test]
    fn test_into_actor() {
        let actor: Actor = MockActor::new(5, "hello").into();
        assert_eq!(actor.display_name, "hello");
    }
}
