//! # Eventlog Test
//!
//! Test support for code that records events through `eventlog`.
//!
//! - [`MockActor`] - Builders for resolved actors
//! - [`TestHarness`] - A recorder wired to an in-memory store and sink
//! - [`FailingIdentityStore`] - An identity store that is always down
//! - Assertion helpers for recorded events and captured `tracing` output
//!
//! ## Example
//!
//! ```rust
//! use eventlog_recorder::EventRequest;
//! use eventlog_test::{assert_lines, MockActor, TestHarness};
//!
//! let harness = TestHarness::new();
//! let actor = harness.register(MockActor::new(1, "hello"));
//!
//! harness
//!     .recorder
//!     .info(EventRequest::new("label").with_actor(actor))
//!     .unwrap();
//!
//! assert_lines(&harness.sink, &["0000000000000001 label (user: hello)"]);
//! ```

pub mod harness;
pub mod mock_actor;
pub mod test_utils;

pub use harness::{FailingIdentityStore, TestHarness};
pub use mock_actor::MockActor;
pub use test_utils::{assert_echoes, assert_lines, capture_tracing, extra_from, SharedBuffer};
