//! Core machine definition types.
//!
//! This module contains the pure part of the crate:
//! - Symbols naming states and event types
//! - Events and declarative configs
//! - Validated, immutable machine definitions
//! - Immutable history tracking
//!
//! Nothing in here performs I/O or holds mutable runtime state.

mod config;
mod error;
mod event;
mod history;
mod machine;
mod symbol;

pub use config::{MachineConfig, StateConfig, StateKind, TransitionConfig};
pub use error::{DefinitionError, Violation};
pub use event::Event;
pub use history::{StateHistory, StateTransition};
pub use machine::{Machine, StateNode};
pub use symbol::Symbol;
