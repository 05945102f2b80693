//! Declarative machine configuration.
//!
//! Configs mirror the familiar statechart object shape:
//!
//! ```json
//! {
//!   "id": "promise",
//!   "initial": "pending",
//!   "states": {
//!     "pending": {
//!       "on": {
//!         "RESOLVE": { "target": "resolved" },
//!         "REJECT": "rejected"
//!       }
//!     },
//!     "resolved": { "type": "final" },
//!     "rejected": { "type": "final" }
//!   }
//! }
//! ```
//!
//! A config is only a description. It is validated when turned into a
//! [`Machine`](crate::core::Machine).

use super::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whether a state is an ordinary state or a terminal one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    #[default]
    Atomic,
    Final,
}

/// Target of a transition, either written as the bare state or as `{ "target": state }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "", untagged)]
pub enum TransitionConfig<S: Symbol> {
    Target(S),
    Object { target: S },
}

impl<S: Symbol> TransitionConfig<S> {
    pub fn target(&self) -> &S {
        match self {
            Self::Target(target) | Self::Object { target } => target,
        }
    }

    pub fn into_target(self) -> S {
        match self {
            Self::Target(target) | Self::Object { target } => target,
        }
    }
}

/// Configuration of a single state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateConfig<S: Symbol, E: Symbol> {
    /// Outgoing transitions keyed by event type
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub on: HashMap<E, TransitionConfig<S>>,

    #[serde(default, rename = "type")]
    pub kind: StateKind,
}

impl<S: Symbol, E: Symbol> Default for StateConfig<S, E> {
    fn default() -> Self {
        Self {
            on: HashMap::new(),
            kind: StateKind::Atomic,
        }
    }
}

impl<S: Symbol, E: Symbol> StateConfig<S, E> {
    /// A terminal state with no transitions.
    pub fn final_state() -> Self {
        Self {
            on: HashMap::new(),
            kind: StateKind::Final,
        }
    }

    /// Add a transition on `event` to `target`.
    pub fn on(mut self, event: E, target: S) -> Self {
        self.on.insert(event, TransitionConfig::Target(target));
        self
    }
}

/// Configuration of a whole machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineConfig<S: Symbol, E: Symbol> {
    /// Informational machine name
    #[serde(default)]
    pub id: String,

    pub initial: S,

    pub states: HashMap<S, StateConfig<S, E>>,
}
