//! Stateful runtime for machine definitions.
//!
//! This module is the "imperative shell" around the pure [`core`]: an
//! [`Interpreter`] holds the current state of one machine instance, accepts
//! events, and notifies observers synchronously.
//!
//! # Lifecycle
//!
//! - `NotStarted`: created by [`interpret`], nothing entered yet
//! - `Running`: after [`Interpreter::start`]
//! - `Stopped`: a final state was entered or [`Interpreter::stop`] was called
//!
//! Inapplicable calls (a second `start`, events before `start` or after
//! stopping, unmatched events) are silent no-ops rather than errors.
//!
//! [`core`]: crate::core

mod service;
mod snapshot;

pub use service::{interpret, Interpreter, Observer};
pub use snapshot::{Snapshot, Status};
