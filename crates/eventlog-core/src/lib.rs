//! # Eventlog Core
//!
//! Core types for the eventlog audit recorder.
//!
//! This crate provides the fundamental building blocks shared by the recorder
//! and by storage adapters:
//!
//! - [`Level`] - Ordered event severity (`DEBUG` through `CRITICAL`)
//! - [`Actor`] / [`ActorRef`] - Who triggered an event, resolved or not
//! - [`Event`] - A persisted audit event
//! - [`EventLine`] - The single-line text rendering of an event
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use eventlog_core::{Actor, ActorId, Event, EventId, Level};
//!
//! let event = Event {
//!     id: EventId(7),
//!     actor: Some(Actor::authenticated(ActorId(1), "hello")),
//!     level: Level::Info,
//!     label: "login".to_string(),
//!     message: Some("password accepted".to_string()),
//!     extra: None,
//!     timestamp: Utc::now(),
//! };
//!
//! assert_eq!(
//!     event.to_string(),
//!     "0000000000000007 login (user: hello) - password accepted"
//! );
//! ```

pub mod actor;
pub mod error;
pub mod event;
pub mod format;
pub mod level;


pub use actor::{Actor, ActorId, ActorRef};
pub use error::{CoreError, Result};
pub use event::{validate_label, Event, EventId, Extra, MAX_LABEL_LEN};
pub use format::{EventLine, ID_WIDTH};
pub use level::Level;
