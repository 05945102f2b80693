//! Validated, immutable machine definitions.

use super::config::{MachineConfig, StateKind};
use super::error::{DefinitionError, Violation};
use super::event::Event;
use super::symbol::Symbol;
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// A declared state together with its outgoing transitions.
#[derive(Clone, Debug, PartialEq)]
pub struct StateNode<S: Symbol, E: Symbol> {
    pub(crate) on: HashMap<E, S>,
    pub(crate) is_final: bool,
}

impl<S: Symbol, E: Symbol> StateNode<S, E> {
    pub(crate) fn new(is_final: bool) -> Self {
        Self {
            on: HashMap::new(),
            is_final,
        }
    }

    /// Outgoing transitions keyed by event type.
    pub fn transitions(&self) -> &HashMap<E, S> {
        &self.on
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }
}

/// Validated machine definition.
///
/// Construction checks referential integrity eagerly, so every lookup on a
/// `Machine` refers to declared states only. A machine never changes after
/// construction and can be shared by any number of interpreters through an
/// `Arc`.
///
/// # Example
///
/// ```rust
/// use fsmlite::core::Machine;
///
/// let machine = Machine::<String, String>::from_json(r#"{
///     "id": "promise",
///     "initial": "pending",
///     "states": {
///         "pending": { "on": { "RESOLVE": "resolved", "REJECT": "rejected" } },
///         "resolved": { "type": "final" },
///         "rejected": { "type": "final" }
///     }
/// }"#).unwrap();
///
/// let pending = "pending".to_string();
/// assert_eq!(machine.transition_for(&pending, &"RESOLVE".to_string()).unwrap(), "resolved");
/// assert!(machine.is_final(&"rejected".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Machine<S: Symbol, E: Symbol> {
    id: String,
    initial: S,
    states: HashMap<S, StateNode<S, E>>,
}

impl<S: Symbol, E: Symbol> Machine<S, E> {
    /// Validate a declarative config and build the machine.
    pub fn from_config(config: MachineConfig<S, E>) -> Result<Self, DefinitionError> {
        let states = config
            .states
            .into_iter()
            .map(|(name, state)| {
                let node = StateNode {
                    on: state
                        .on
                        .into_iter()
                        .map(|(event, target)| (event, target.into_target()))
                        .collect(),
                    is_final: state.kind == StateKind::Final,
                };
                (name, node)
            })
            .collect();

        Self::from_parts(config.id, Some(config.initial), states, Vec::new())
    }

    /// Parse a JSON config and build the machine.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let config: MachineConfig<S, E> = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    /// Validate already indexed parts. `pending` carries violations found
    /// before the table existed (by the builder). A missing `initial` is
    /// reported alongside everything else.
    pub(crate) fn from_parts(
        id: String,
        initial: Option<S>,
        states: HashMap<S, StateNode<S, E>>,
        pending: Vec<Violation>,
    ) -> Result<Self, DefinitionError> {
        let checked = validate_table(&states, pending)
            .and(validate_initial(initial, &states))
            .map(|(_, initial)| initial);

        match checked {
            Validation::Success(initial) => {
                tracing::debug!(
                    machine = %id,
                    initial = %initial.name(),
                    states = states.len(),
                    "machine definition created"
                );
                Ok(Self {
                    id,
                    initial,
                    states,
                })
            }
            Validation::Failure(errors) => Err(DefinitionError::Invalid {
                machine: id,
                violations: errors.iter().cloned().collect(),
            }),
        }
    }

    /// Informational machine name.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn initial(&self) -> &S {
        &self.initial
    }

    /// Declared states, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.states.keys()
    }

    pub fn state_node(&self, state: &S) -> Option<&StateNode<S, E>> {
        self.states.get(state)
    }

    pub fn has_state(&self, state: &S) -> bool {
        self.states.contains_key(state)
    }

    /// Look up the target of `event` from `state`.
    pub fn transition_for(&self, state: &S, event: &E) -> Option<&S> {
        self.states.get(state).and_then(|node| node.on.get(event))
    }

    /// Undeclared states are never final.
    pub fn is_final(&self, state: &S) -> bool {
        self.states.get(state).is_some_and(|node| node.is_final)
    }

    /// Event types with a transition out of `state`.
    pub fn events_from(&self, state: &S) -> Vec<&E> {
        self.states
            .get(state)
            .map(|node| node.on.keys().collect())
            .unwrap_or_default()
    }

    /// Pure transition function: the state `event` leads to from `state`.
    ///
    /// Returns `None` when the event is not handled there, which includes
    /// every event sent to a final state.
    pub fn transition(&self, state: &S, event: &Event<E>) -> Option<&S> {
        if self.is_final(state) {
            return None;
        }
        self.transition_for(state, &event.kind)
    }
}

/// Check referential integrity, accumulating every violation.
fn validate_initial<S: Symbol, E: Symbol>(
    initial: Option<S>,
    states: &HashMap<S, StateNode<S, E>>,
) -> Validation<S, NonEmptyVec<Violation>> {
    match initial {
        None => Validation::fail(Violation::MissingInitialState),
        Some(initial) if states.contains_key(&initial) => Validation::success(initial),
        Some(initial) => Validation::fail(Violation::UnknownInitialState {
            initial: initial.name().to_string(),
        }),
    }
}

/// Checks that do not depend on the initial state.
fn validate_table<S: Symbol, E: Symbol>(
    states: &HashMap<S, StateNode<S, E>>,
    pending: Vec<Violation>,
) -> Validation<(), NonEmptyVec<Violation>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<Violation>>> = Vec::new();

    for violation in pending {
        checks.push(Validation::fail(violation));
    }

    for (name, node) in states {
        if node.is_final && !node.on.is_empty() {
            checks.push(Validation::fail(Violation::FinalStateHasTransitions {
                state: name.name().to_string(),
            }));
        }

        for (event, target) in &node.on {
            if !states.contains_key(target) {
                checks.push(Validation::fail(Violation::UnknownTarget {
                    from: name.name().to_string(),
                    event: event.name().to_string(),
                    target: target.name().to_string(),
                }));
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}
