//! Event recorder and its convenience API.

use std::sync::Arc;

use eventlog_core::{validate_label, Actor, ActorId, ActorRef, Event, EventLine, Extra, Level};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::RecorderConfig;
use crate::error::Result;
use crate::resolver::{ActorResolver, Resolution};
use crate::sink::{LogSink, TracingSink};
use crate::store::{EventStore, IdentityStore, LookupError, NewEvent, StoreError};

/// Label of the event recorded when an actor id cannot be resolved.
pub const COULD_NOT_FIND_USER: &str = "EVENTLOG_COULD_NOT_FIND_USER";

/// Key under which captured error traces are stored in `extra`.
pub const EXCEPTION_KEY: &str = "exception";

const COULD_NOT_FIND_USER_MESSAGE: &str = "Could not resolve user_id to actual user";

/// Arguments of a single recording call.
///
/// Every entry point of [`EventRecorder`] takes the same request, so changing
/// the severity of a call site only means calling a different method.
///
/// # Examples
///
/// ```rust
/// use eventlog_recorder::EventRequest;
/// use eventlog_core::Level;
///
/// let request = EventRequest::new("PASSWORD_RESET")
///     .with_message("reset link sent")
///     .with_actor(42)
///     .with_level(Level::Warning);
/// assert_eq!(request.label, "PASSWORD_RESET");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventRequest {
    /// Event category
    pub label: String,

    /// Free-text description
    pub message: Option<String>,

    /// Actor reference, resolved before persisting
    pub actor: ActorRef,

    /// Structured metadata
    pub extra: Option<Extra>,

    /// Severity; the entry point decides the default
    pub level: Option<Level>,

    /// Whether to mirror the event to the log sink; defaults to the
    /// recorder configuration
    pub emit_to_log: Option<bool>,
}

impl EventRequest {
    /// Creates a request with only a label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Sets the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the actor reference.
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<ActorRef>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Sets the extra mapping.
    #[must_use]
    pub fn with_extra(mut self, extra: Extra) -> Self {
        self.extra = Some(extra);
        self
    }

    /// Sets the severity.
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Enables or disables mirroring to the log sink.
    #[must_use]
    pub const fn with_emit_to_log(mut self, emit_to_log: bool) -> Self {
        self.emit_to_log = Some(emit_to_log);
        self
    }
}

/// Records events into a store and mirrors them to a log sink.
///
/// The recorder holds no mutable state of its own and can be shared across
/// threads; id ordering is whatever the store serializes.
#[derive(Debug, Clone)]
pub struct EventRecorder {
    store: Arc<dyn EventStore>,
    resolver: ActorResolver,
    sink: Arc<dyn LogSink>,
    config: RecorderConfig,
}

impl EventRecorder {
    /// Creates a builder for a recorder over the given collaborators.
    #[must_use]
    pub fn builder(
        store: Arc<dyn EventStore>,
        identities: Arc<dyn IdentityStore>,
    ) -> EventRecorderBuilder {
        EventRecorderBuilder::new(store, identities)
    }

    /// Returns the recorder configuration.
    #[must_use]
    pub const fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Records an event. The level defaults to [`Level::Info`].
    ///
    /// The event is persisted regardless of the sink's threshold.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidRequest`] for a bad label and
    /// [`RecordError::Persistence`] if the store fails, in which case nothing
    /// is emitted to the sink.
    ///
    /// [`RecordError::InvalidRequest`]: crate::RecordError::InvalidRequest
    /// [`RecordError::Persistence`]: crate::RecordError::Persistence
    pub fn record(&self, request: EventRequest) -> Result<Event> {
        self.record_at(request, Level::Info)
    }

    /// Records a critical event, tolerating store failures.
    ///
    /// The level defaults to [`Level::Critical`]. A store failure is logged
    /// and yields `Ok(None)`. The mirrored line never carries an id, since
    /// one may not exist.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidRequest`] for a bad label. Store errors
    /// are never returned.
    ///
    /// [`RecordError::InvalidRequest`]: crate::RecordError::InvalidRequest
    pub fn record_fatal(&self, request: EventRequest) -> Result<Option<Event>> {
        validate_label(&request.label, self.config.max_label_len)?;
        let level = request.level.unwrap_or(Level::Critical);
        let emit = self.should_emit(&request);

        let actor = self.resolve_actor(&request.actor).unwrap_or_else(|error| {
            warn!(%error, "Could not record actor resolution failure");
            None
        });

        let line = EventLine::without_id(
            &request.label,
            actor.as_ref(),
            request.message.as_deref(),
            request.extra.as_ref(),
        )
        .to_string();

        let event = match self.persist(request, actor, level) {
            Ok(event) => Some(event),
            Err(error) => {
                warn!(%error, %line, "Fatal event was not persisted");
                None
            }
        };

        if emit {
            self.sink.emit(level, &line);
        }

        Ok(event)
    }

    /// Records an event carrying the trace of a caught error.
    ///
    /// The error's full debug rendering (message, cause chain and backtrace
    /// when captured) is stored under [`EXCEPTION_KEY`] in `extra`, replacing
    /// any existing value. The level defaults to [`Level::Warning`].
    ///
    /// # Errors
    ///
    /// Same as [`EventRecorder::record`].
    pub fn record_exception(
        &self,
        mut request: EventRequest,
        error: &anyhow::Error,
    ) -> Result<Event> {
        let mut extra = request.extra.take().unwrap_or_default();
        extra.insert(EXCEPTION_KEY.to_string(), Value::from(format!("{error:?}")));
        request.extra = Some(extra);

        self.record_at(request, Level::Warning)
    }

    /// Records a [`Level::Debug`] event.
    ///
    /// # Errors
    ///
    /// Same as [`EventRecorder::record`].
    pub fn debug(&self, request: EventRequest) -> Result<Event> {
        self.record(request.with_level(Level::Debug))
    }

    /// Records a [`Level::Info`] event.
    ///
    /// # Errors
    ///
    /// Same as [`EventRecorder::record`].
    pub fn info(&self, request: EventRequest) -> Result<Event> {
        self.record(request.with_level(Level::Info))
    }

    /// Alias of [`EventRecorder::info`].
    ///
    /// # Errors
    ///
    /// Same as [`EventRecorder::record`].
    pub fn log_event(&self, request: EventRequest) -> Result<Event> {
        self.info(request)
    }

    /// Records a [`Level::Warning`] event.
    ///
    /// # Errors
    ///
    /// Same as [`EventRecorder::record`].
    pub fn warning(&self, request: EventRequest) -> Result<Event> {
        self.record(request.with_level(Level::Warning))
    }

    /// Records a [`Level::Error`] event.
    ///
    /// # Errors
    ///
    /// Same as [`EventRecorder::record`].
    pub fn error(&self, request: EventRequest) -> Result<Event> {
        self.record(request.with_level(Level::Error))
    }

    /// Records a [`Level::Critical`] event through the store-tolerant path.
    ///
    /// # Errors
    ///
    /// Same as [`EventRecorder::record_fatal`].
    pub fn fatal(&self, request: EventRequest) -> Result<Option<Event>> {
        self.record_fatal(request.with_level(Level::Critical))
    }

    /// Alias of [`EventRecorder::fatal`].
    ///
    /// # Errors
    ///
    /// Same as [`EventRecorder::record_fatal`].
    pub fn critical(&self, request: EventRequest) -> Result<Option<Event>> {
        self.fatal(request)
    }

    /// Alias of [`EventRecorder::record_exception`].
    ///
    /// # Errors
    ///
    /// Same as [`EventRecorder::record`].
    pub fn exception(&self, request: EventRequest, error: &anyhow::Error) -> Result<Event> {
        self.record_exception(request, error)
    }

    fn record_at(&self, request: EventRequest, default_level: Level) -> Result<Event> {
        validate_label(&request.label, self.config.max_label_len)?;
        let level = request.level.unwrap_or(default_level);
        let emit = self.should_emit(&request);

        let actor = self.resolve_actor(&request.actor)?;
        let event = self.persist(request, actor, level)?;

        if emit {
            self.sink.emit(level, &event.to_string());
        }

        Ok(event)
    }

    fn should_emit(&self, request: &EventRequest) -> bool {
        request.emit_to_log.unwrap_or(self.config.emit_to_log)
    }

    fn persist(
        &self,
        request: EventRequest,
        actor: Option<Actor>,
        level: Level,
    ) -> std::result::Result<Event, StoreError> {
        let inserted = self.store.insert(&NewEvent {
            label: &request.label,
            message: request.message.as_deref(),
            actor: actor.as_ref(),
            level,
            extra: request.extra.as_ref(),
        })?;

        debug!(
            event_id = %inserted.id,
            label = %request.label,
            %level,
            store = self.store.name(),
            "Recorded event"
        );

        Ok(Event {
            id: inserted.id,
            actor,
            level,
            label: request.label,
            message: request.message,
            extra: request.extra,
            timestamp: inserted.timestamp,
        })
    }

    /// Resolves the actor, recording a diagnostic event for unknown ids.
    ///
    /// The diagnostic is written without an actor, so it never recurses.
    fn resolve_actor(&self, actor: &ActorRef) -> std::result::Result<Option<Actor>, StoreError> {
        match self.resolver.resolve(actor) {
            Resolution::Actor(actor) => Ok(Some(actor)),
            Resolution::NoActor => Ok(None),
            Resolution::Unresolved { id, error } => {
                self.report_unresolved(id, &error)?;
                Ok(None)
            }
        }
    }

    /// Always mirrored to the sink, whatever the caller asked for.
    fn report_unresolved(
        &self,
        id: ActorId,
        error: &LookupError,
    ) -> std::result::Result<Event, StoreError> {
        let mut extra = Extra::new();
        extra.insert("user_id".to_string(), Value::from(id.0));
        extra.insert(EXCEPTION_KEY.to_string(), Value::from(error.to_string()));

        let request = EventRequest::new(COULD_NOT_FIND_USER)
            .with_message(COULD_NOT_FIND_USER_MESSAGE)
            .with_extra(extra);

        let event = self.persist(request, None, Level::Warning)?;
        self.sink.emit(Level::Warning, &event.to_string());
        Ok(event)
    }
}

/// Builder for configuring an [`EventRecorder`].
#[derive(Debug)]
pub struct EventRecorderBuilder {
    store: Arc<dyn EventStore>,
    identities: Arc<dyn IdentityStore>,
    sink: Arc<dyn LogSink>,
    config: RecorderConfig,
}

impl EventRecorderBuilder {
    /// Creates a builder with a [`TracingSink`] and default configuration.
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>, identities: Arc<dyn IdentityStore>) -> Self {
        Self {
            store,
            identities,
            sink: Arc::new(TracingSink::new()),
            config: RecorderConfig::default(),
        }
    }

    /// Sets the log sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: RecorderConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the recorder.
    #[must_use]
    pub fn build(self) -> EventRecorder {
        EventRecorder {
            store: self.store,
            resolver: ActorResolver::new(self.identities),
            sink: self.sink,
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use crate::memory::InMemoryStore;
    use crate::sink::InMemorySink;
    use eventlog_core::EventId;
    use serde_json::json;

    struct Fixture {
        store: Arc<InMemoryStore>,
        sink: Arc<InMemorySink>,
        recorder: EventRecorder,
    }

    fn fixture() -> Fixture {
        fixture_with(InMemorySink::with_threshold(Level::Info), RecorderConfig::default())
    }

    fn fixture_with(sink: InMemorySink, config: RecorderConfig) -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        store.add_actor(Actor::authenticated(ActorId(1), "johndoe"));
        let sink = Arc::new(sink);
        let recorder = EventRecorder::builder(store.clone(), store.clone())
            .with_sink(sink.clone())
            .with_config(config)
            .build();
        Fixture {
            store,
            sink,
            recorder,
        }
    }

    fn extra() -> Extra {
        let mut extra = Extra::new();
        extra.insert("key".to_string(), json!("value"));
        extra.insert("key2".to_string(), json!("value2"));
        extra
    }

    #[test]
    fn test_basic_creation() {
        let f = fixture();
        let event = f.recorder.record(EventRequest::new("test label")).unwrap();

        assert_eq!(event.id, EventId(1));
        assert_eq!(event.label, "test label");
        assert!(event.message.is_none());
        assert!(event.actor.is_none());
        assert!(event.extra.is_none());
        assert_eq!(event.level, Level::Info);
        assert_eq!(f.sink.lines(), vec!["0000000000000001 test label"]);
    }

    #[test]
    fn test_create_event_full_with_actor_id() {
        let f = fixture();
        let event = f
            .recorder
            .record(
                EventRequest::new("test label")
                    .with_message("message")
                    .with_actor(1_u64)
                    .with_extra(extra())
                    .with_level(Level::Warning),
            )
            .unwrap();

        assert_eq!(event.message.as_deref(), Some("message"));
        assert_eq!(event.actor.unwrap().display_name, "johndoe");
        assert_eq!(event.extra, Some(extra()));
        assert_eq!(event.level, Level::Warning);
    }

    #[test]
    fn test_emit_to_log_false_persists_silently() {
        let f = fixture();
        f.recorder
            .record(EventRequest::new("label").with_emit_to_log(false))
            .unwrap();

        assert_eq!(f.store.len(), 1);
        assert!(f.sink.lines().is_empty());
    }

    #[test]
    fn test_config_disables_emission_by_default() {
        let f = fixture_with(
            InMemorySink::new(),
            RecorderConfig::new().with_emit_to_log(false),
        );
        f.recorder.record(EventRequest::new("quiet")).unwrap();
        f.recorder
            .record(EventRequest::new("loud").with_emit_to_log(true))
            .unwrap();

        assert_eq!(f.sink.lines(), vec!["0000000000000002 loud"]);
    }

    #[test]
    fn test_unknown_actor_records_diagnostic() {
        let f = fixture();
        let event = f
            .recorder
            .record(
                EventRequest::new("label")
                    .with_message("message")
                    .with_actor(999_u64)
                    .with_emit_to_log(false),
            )
            .unwrap();

        assert!(event.actor.is_none());
        assert_eq!(event.id, EventId(2));

        let diagnostic = f.store.get(EventId(1)).unwrap().unwrap();
        assert_eq!(diagnostic.label, COULD_NOT_FIND_USER);
        assert_eq!(diagnostic.level, Level::Warning);
        assert_eq!(diagnostic.extra_value("user_id"), Some(&json!(999)));

        let entries = f.sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, Level::Warning);
        assert!(entries[0].1.contains("999"));
    }

    #[test]
    fn test_invalid_label_is_rejected_before_store() {
        let f = fixture();
        let err = f
            .recorder
            .record(EventRequest::new("x".repeat(51)))
            .unwrap_err();

        assert!(matches!(err, RecordError::InvalidRequest(_)));
        assert!(f.store.is_empty());
    }

    #[test]
    fn test_store_failure_propagates_without_emission() {
        let f = fixture();
        f.store.set_available(false);

        let err = f.recorder.record(EventRequest::new("label")).unwrap_err();
        assert!(err.is_persistence());
        assert!(f.sink.lines().is_empty());
    }

    #[test]
    fn test_diagnostic_store_failure_propagates() {
        let f = fixture();
        f.store.set_available(false);

        let err = f
            .recorder
            .record(EventRequest::new("label").with_actor(999_u64))
            .unwrap_err();

        assert!(matches!(
            err,
            RecordError::Persistence(StoreError::Unavailable(_))
        ));
        assert!(f.sink.lines().is_empty());
    }

    #[test]
    fn test_recording_does_not_register_unknown_actor() {
        let f = fixture();
        let ghost = Actor::authenticated(ActorId(77), "ghost");

        let first = f
            .recorder
            .record(EventRequest::new("a").with_actor(&ghost))
            .unwrap();
        assert_eq!(first.actor, Some(ghost));

        let second = f
            .recorder
            .record(EventRequest::new("b").with_actor(77_u64))
            .unwrap();
        assert!(second.actor.is_none());

        let lines = f.sink.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "0000000000000001 a (user: ghost)");
        assert!(lines[1].starts_with("0000000000000002 EVENTLOG_COULD_NOT_FIND_USER - "));
        assert!(lines[1].contains("\"user_id\":77"));
        assert_eq!(lines[2], "0000000000000003 b");
    }

    #[test]
    fn test_fatal_line_has_no_id() {
        let f = fixture();
        let event = f
            .recorder
            .fatal(
                EventRequest::new("label")
                    .with_message("message")
                    .with_actor(1_u64)
                    .with_extra(extra()),
            )
            .unwrap()
            .unwrap();

        assert_eq!(event.level, Level::Critical);
        assert_eq!(
            f.sink.entries(),
            vec![(
                Level::Critical,
                r#"label (user: johndoe) - message {"key":"value","key2":"value2"}"#.to_string()
            )]
        );
    }

    #[test]
    fn test_fatal_tolerates_store_outage() {
        let f = fixture();
        f.store.set_available(false);

        let event = f
            .recorder
            .critical(EventRequest::new("label").with_actor(999_u64))
            .unwrap();

        assert!(event.is_none());
        assert_eq!(f.sink.lines(), vec!["label"]);
    }

    #[test]
    fn test_fatal_still_rejects_invalid_label() {
        let f = fixture();
        assert!(f.recorder.fatal(EventRequest::new("")).is_err());
        assert!(f.sink.lines().is_empty());
    }

    #[test]
    fn test_record_exception_stores_trace() {
        let f = fixture();
        let error = anyhow::anyhow!("disk on fire").context("while saving");

        let event = f
            .recorder
            .record_exception(EventRequest::new("EXCEPTION").with_message("message"), &error)
            .unwrap();

        assert_eq!(event.level, Level::Warning);
        assert_eq!(event.message.as_deref(), Some("message"));
        let trace = event.extra_value(EXCEPTION_KEY).unwrap().as_str().unwrap();
        assert!(trace.contains("while saving"));
        assert!(trace.contains("disk on fire"));
    }

    #[test]
    fn test_record_exception_overwrites_existing_key() {
        let f = fixture();
        let mut extra = extra();
        extra.insert(EXCEPTION_KEY.to_string(), json!("stale"));

        let event = f
            .recorder
            .exception(
                EventRequest::new("EXCEPTION")
                    .with_extra(extra)
                    .with_level(Level::Error),
                &anyhow::anyhow!("fresh"),
            )
            .unwrap();

        assert_eq!(event.level, Level::Error);
        assert_eq!(event.extra_value("key"), Some(&json!("value")));
        assert_ne!(event.extra_value(EXCEPTION_KEY), Some(&json!("stale")));
    }

    #[test]
    fn test_convenience_levels() {
        let f = fixture_with(InMemorySink::new(), RecorderConfig::default());
        let request = || EventRequest::new("label").with_message("message").with_actor(1_u64);

        assert_eq!(f.recorder.debug(request()).unwrap().level, Level::Debug);
        assert_eq!(f.recorder.info(request()).unwrap().level, Level::Info);
        assert_eq!(f.recorder.log_event(request()).unwrap().level, Level::Info);
        assert_eq!(f.recorder.warning(request()).unwrap().level, Level::Warning);
        assert_eq!(f.recorder.error(request()).unwrap().level, Level::Error);
        assert_eq!(
            f.recorder.fatal(request()).unwrap().unwrap().level,
            Level::Critical
        );

        let levels: Vec<Level> = f.sink.entries().into_iter().map(|(level, _)| level).collect();
        assert_eq!(
            levels,
            vec![
                Level::Debug,
                Level::Info,
                Level::Info,
                Level::Warning,
                Level::Error,
                Level::Critical
            ]
        );
    }
}
