//! fsmlite: a small embeddable finite-state-machine interpreter
//!
//! fsmlite keeps a pure core of validated, immutable machine definitions and
//! a thin imperative shell that runs them. Machines are flat: one active
//! state at a time, event-driven transitions, and terminal ("final") states.
//!
//! # Core Concepts
//!
//! - **Machine**: immutable, validated states and transitions, shareable
//!   across interpreters
//! - **Interpreter**: the running instance, which tracks the current state and
//!   notifies observers synchronously
//! - **History** and **Checkpoints**: what happened, and how to resume it
//!
//! # Example
//!
//! ```rust
//! use fsmlite::{create_machine, interpret, Status};
//! use std::sync::{Arc, Mutex};
//!
//! let machine = create_machine::<String, String>(serde_json::from_str(r#"{
//!     "id": "promise",
//!     "initial": "pending",
//!     "states": {
//!         "pending": {
//!             "on": {
//!                 "RESOLVE": { "target": "resolved" },
//!                 "REJECT": { "target": "rejected" }
//!             }
//!         },
//!         "resolved": { "type": "final" },
//!         "rejected": { "type": "final" }
//!     }
//! }"#).unwrap()).unwrap();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! let mut service = interpret(Arc::new(machine));
//! service
//!     .on_transition(move |state| sink.lock().unwrap().push(state.value.clone()))
//!     .start();
//! service.send("RESOLVE");
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["pending", "resolved"]);
//! assert_eq!(service.status(), Status::Stopped);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod interpreter;
pub mod observers;

// Re-export commonly used types
pub use crate::core::{
    DefinitionError, Event, Machine, MachineConfig, StateConfig, Symbol, Violation,
};
pub use builder::MachineBuilder;
pub use checkpoint::{Checkpoint, CheckpointError};
pub use interpreter::{interpret, Interpreter, Snapshot, Status};

/// Validate a declarative config and build an immutable machine.
pub fn create_machine<S: Symbol, E: Symbol>(
    config: MachineConfig<S, E>,
) -> Result<Machine<S, E>, DefinitionError> {
    Machine::from_config(config)
}
