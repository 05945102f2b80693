//! Observable interpreter state.

use crate::core::{Event, Symbol};
use serde::{Deserialize, Serialize};

/// Lifecycle of an interpreter.
///
/// `Stopped` is terminal: it is reached by entering a final state or by an
/// explicit stop, and a stopped interpreter cannot be restarted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    NotStarted,
    Running,
    Stopped,
}

/// What observers see after each state entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Snapshot<S: Symbol, E: Symbol> {
    /// The state just entered
    pub value: S,

    /// The event that caused the entry; `None` for the initial state
    pub event: Option<Event<E>>,

    /// The state left behind; `None` for the initial state
    pub previous: Option<S>,

    /// False only for self-transitions
    pub changed: bool,

    /// True when `value` is a final state
    pub done: bool,
}

impl<S: Symbol, E: Symbol> Snapshot<S, E> {
    pub(crate) fn initial(value: S, done: bool) -> Self {
        Self {
            value,
            event: None,
            previous: None,
            changed: true,
            done,
        }
    }

    pub(crate) fn after(previous: S, event: Event<E>, value: S, done: bool) -> Self {
        Self {
            changed: previous != value,
            value,
            event: Some(event),
            previous: Some(previous),
            done,
        }
    }

    /// Check whether the snapshot is in `state`.
    pub fn matches(&self, state: &S) -> bool {
        self.value == *state
    }
}
