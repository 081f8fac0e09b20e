//! In-memory reference store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use eventlog_core::{Actor, ActorId, Event, EventId, Extra, Level};
use parking_lot::Mutex;

use crate::store::{EventStore, IdentityStore, Inserted, LookupError, NewEvent, StoreError};

/// Store row; extra is kept serialized like a JSON column.
///
/// The actor is a snapshot taken at insert time. Inserting never adds to the
/// identity table.
#[derive(Debug, Clone)]
struct Row {
    id: EventId,
    actor: Option<Actor>,
    level: u8,
    label: String,
    message: Option<String>,
    extra: Option<String>,
    timestamp: DateTime<Utc>,
}

#[derive(Debug)]
struct State {
    next_id: u64,
    rows: Vec<Row>,
    actors: HashMap<ActorId, Actor>,
    available: bool,
}

/// Thread-safe store that keeps events and actors in memory.
///
/// Ids start at 1 and increase by one per insert. The store can be marked
/// unavailable to simulate an outage.
#[derive(Debug)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1,
                rows: Vec::new(),
                actors: HashMap::new(),
                available: true,
            }),
        }
    }

    /// Registers an actor with the identity side of the store.
    pub fn add_actor(&self, actor: Actor) {
        self.state.lock().actors.insert(actor.id, actor);
    }

    /// Marks the store reachable or unreachable.
    pub fn set_available(&self, available: bool) {
        self.state.lock().available = available;
    }

    /// Returns the number of stored events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().rows.len()
    }

    /// Returns `true` if no events are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Loads a single event.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored row cannot be decoded.
    pub fn get(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        let state = self.state.lock();
        let event = state
            .rows
            .iter()
            .find(|row| row.id == id)
            .map(decode)
            .transpose();
        event
    }

    /// Lists all events, newest first.
    ///
    /// Rows sharing a timestamp are ordered by descending id.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored row cannot be decoded.
    pub fn list(&self) -> Result<Vec<Event>, StoreError> {
        let state = self.state.lock();
        let mut rows: Vec<&Row> = state.rows.iter().collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        let events = rows.into_iter().map(decode).collect();
        events
    }
}

fn decode(row: &Row) -> Result<Event, StoreError> {
    let extra = row
        .extra
        .as_deref()
        .map(serde_json::from_str::<Extra>)
        .transpose()?;
    let level = Level::from_code(row.level).map_err(|e| StoreError::Decode(e.to_string()))?;

    Ok(Event {
        id: row.id,
        actor: row.actor.clone(),
        level,
        label: row.label.clone(),
        message: row.message.clone(),
        extra,
        timestamp: row.timestamp,
    })
}

impl EventStore for InMemoryStore {
    fn insert(&self, event: &NewEvent<'_>) -> Result<Inserted, StoreError> {
        let extra = event.extra.map(serde_json::to_string).transpose()?;

        let mut state = self.state.lock();
        if !state.available {
            return Err(StoreError::Unavailable("in-memory store is offline".to_string()));
        }

        let id = EventId(state.next_id);
        state.next_id += 1;
        let timestamp = Utc::now();

        state.rows.push(Row {
            id,
            actor: event.actor.cloned(),
            level: event.level.code(),
            label: event.label.to_string(),
            message: event.message.map(str::to_string),
            extra,
            timestamp,
        });

        Ok(Inserted { id, timestamp })
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}

impl IdentityStore for InMemoryStore {
    fn lookup_actor(&self, id: ActorId) -> Result<Actor, LookupError> {
        self.state
            .lock()
            .actors
            .get(&id)
            .cloned()
            .ok_or(LookupError::NotFound(id))
    }
}
