//! Event recording for the eventlog audit recorder.
//!
//! This crate turns event requests into persisted [`Event`]s and mirrors
//! them to a leveled log sink:
//!
//! - Actor references are resolved against an [`IdentityStore`]; unknown ids
//!   are downgraded to "no actor" and reported as a diagnostic event
//! - Events are persisted through an [`EventStore`]
//! - The formatted line is emitted to a [`LogSink`], which applies its own
//!   level threshold
//! - Critical events survive store outages via [`EventRecorder::fatal`]
//!
//! # Example
//!
//! ```rust
//! use eventlog_recorder::{EventRecorder, EventRequest, InMemorySink, InMemoryStore};
//! use eventlog_core::Level;
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryStore::new());
//! let sink = Arc::new(InMemorySink::new());
//! let recorder = EventRecorder::builder(store.clone(), store)
//!     .with_sink(sink.clone())
//!     .build();
//!
//! let event = recorder.info(EventRequest::new("USER_LOGIN").with_message("ok")).unwrap();
//! assert_eq!(event.level, Level::Info);
//! assert_eq!(sink.lines(), vec!["0000000000000001 USER_LOGIN - ok".to_string()]);
//! ```
//!
//! [`Event`]: eventlog_core::Event

mod config;
mod error;
mod memory;
mod recorder;
mod resolver;
mod sink;
mod store;

pub use config::{ConfigError, RecorderConfig};
pub use error::{RecordError, Result};
pub use memory::InMemoryStore;
pub use recorder::{
    EventRecorder, EventRecorderBuilder, EventRequest, COULD_NOT_FIND_USER, EXCEPTION_KEY,
};
pub use resolver::{ActorResolver, Resolution};
pub use sink::{InMemorySink, LogSink, TracingSink, LOG_TARGET};
pub use store::{EventStore, IdentityStore, Inserted, LookupError, NewEvent, StoreError};
