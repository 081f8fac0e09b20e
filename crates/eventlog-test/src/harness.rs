//! Recorder harnesses for tests.

use std::sync::Arc;

use eventlog_core::{Actor, ActorId, Level};
use eventlog_recorder::{
    EventRecorder, IdentityStore, InMemorySink, InMemoryStore, LookupError, RecorderConfig,
};

/// A recorder wired to an in-memory store and capturing sink.
#[derive(Debug)]
pub struct TestHarness {
    /// Event and identity store
    pub store: Arc<InMemoryStore>,
    /// Captured mirrored lines
    pub sink: Arc<InMemorySink>,
    /// Recorder under test
    pub recorder: EventRecorder,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Creates a harness whose sink accepts every level.
    #[must_use]
    pub fn new() -> Self {
        Self::with_threshold(Level::Debug)
    }

    /// Creates a harness whose sink drops lines below `threshold`.
    #[must_use]
    pub fn with_threshold(threshold: Level) -> Self {
        Self::build(threshold, RecorderConfig::default())
    }

    /// Creates a harness with a custom recorder configuration.
    #[must_use]
    pub fn with_config(config: RecorderConfig) -> Self {
        Self::build(Level::Debug, config)
    }

    fn build(threshold: Level, config: RecorderConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let sink = Arc::new(InMemorySink::with_threshold(threshold));
        let recorder = EventRecorder::builder(store.clone(), store.clone())
            .with_sink(sink.clone())
            .with_config(config)
            .build();

        Self {
            store,
            sink,
            recorder,
        }
    }

    /// Registers an actor with the store and returns it.
    pub fn register(&self, actor: impl Into<Actor>) -> Actor {
        let actor = actor.into();
        self.store.add_actor(actor.clone());
        actor
    }
}

/// Identity store whose lookups always fail as unavailable.
#[derive(Debug, Default)]
pub struct FailingIdentityStore;

impl IdentityStore for FailingIdentityStore {
    fn lookup_actor(&self, _id: ActorId) -> Result<Actor, LookupError> {
        Err(LookupError::Unavailable("identity store offline".to_string()))
    }
}
