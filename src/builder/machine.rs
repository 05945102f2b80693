//! Builder for constructing machine definitions.

use crate::core::{DefinitionError, Machine, StateNode, Symbol, Violation};
use std::collections::HashMap;

/// Builder for constructing machine definitions with a fluent API.
///
/// States and transitions may be declared in any order; all checks run in
/// [`build`](Self::build), which reports every problem at once.
pub struct MachineBuilder<S: Symbol, E: Symbol> {
    id: String,
    initial: Option<S>,
    states: HashMap<S, bool>,
    transitions: Vec<(S, E, S)>,
    conflicts: Vec<Violation>,
}

impl<S: Symbol, E: Symbol> MachineBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            id: String::new(),
            initial: None,
            states: HashMap::new(),
            transitions: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    /// Set the informational machine name.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Declare an ordinary state.
    ///
    /// Declaring a state twice is fine; declaring it both ordinary and final
    /// is reported by [`build`](Self::build).
    pub fn state(mut self, state: S) -> Self {
        self.declare(state, false);
        self
    }

    /// Declare a final state.
    pub fn final_state(mut self, state: S) -> Self {
        self.declare(state, true);
        self
    }

    /// Declare multiple ordinary states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = S>) -> Self {
        for state in states {
            self.declare(state, false);
        }
        self
    }

    fn declare(&mut self, state: S, is_final: bool) {
        let name = state.name().to_string();
        if let Some(previous) = self.states.insert(state, is_final) {
            if previous != is_final {
                self.conflicts.push(Violation::ConflictingStateKind { state: name });
            }
        }
    }

    /// Add a transition from `from` to `to` on `event`.
    pub fn transition(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.push((from, event, to));
        self
    }

    /// Build the machine.
    /// Returns an error listing every violation if the definition is invalid.
    pub fn build(self) -> Result<Machine<S, E>, DefinitionError> {
        let mut pending = self.conflicts;

        let mut nodes: HashMap<S, StateNode<S, E>> = self
            .states
            .into_iter()
            .map(|(state, is_final)| (state, StateNode::new(is_final)))
            .collect();

        for (from, event, to) in self.transitions {
            let Some(node) = nodes.get_mut(&from) else {
                pending.push(Violation::UnknownSource {
                    from: from.name().to_string(),
                });
                continue;
            };

            if node.on.contains_key(&event) {
                pending.push(Violation::DuplicateTransition {
                    from: from.name().to_string(),
                    event: event.name().to_string(),
                });
                continue;
            }

            node.on.insert(event, to);
        }

        Machine::from_parts(self.id, self.initial, nodes, pending)
    }
}

impl<S: Symbol, E: Symbol> Default for MachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
