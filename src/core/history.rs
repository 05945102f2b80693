//! State transition history tracking.
//!
//! Provides immutable tracking of state machine transitions over time,
//! following functional programming principles.

use super::symbol::Symbol;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state transition.
///
/// Transitions are immutable values representing a move from one state
/// to another, caused by an event, at a specific point in time.
///
/// # Example
///
/// ```rust
/// use fsmlite::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "pending".to_string(),
///     to: "resolved".to_string(),
///     event: "RESOLVE".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.event, "RESOLVE");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: Symbol, E: Symbol> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The type of the event that triggered the transition
    pub event: E,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions.
///
/// History is immutable - the `record` method returns a new history
/// with the transition added.
///
/// # Example
///
/// ```rust
/// use fsmlite::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history: StateHistory<String, String> = StateHistory::new();
/// let history = history.record(StateTransition {
///     from: "idle".to_string(),
///     to: "busy".to_string(),
///     event: "WORK".to_string(),
///     timestamp: Utc::now(),
/// });
/// let history = history.record(StateTransition {
///     from: "busy".to_string(),
///     to: "idle".to_string(),
///     event: "REST".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // idle -> busy -> idle
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: Symbol, E: Symbol> {
    transitions: Vec<StateTransition<S, E>>,
}

impl<S: Symbol, E: Symbol> Default for StateHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol, E: Symbol> StateHistory<S, E> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// This does not mutate the existing history but returns a new one
    /// with the transition added.
    pub fn record(&self, transition: StateTransition<S, E>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append a transition in place, for the interpreter's own log.
    pub(crate) fn push(&mut self, transition: StateTransition<S, E>) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the first `from` state, then
    /// the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all transitions in order.
    pub fn transitions(&self) -> &[StateTransition<S, E>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: &str, to: &str, event: &str) -> StateTransition<String, String> {
        StateTransition {
            from: from.to_string(),
            to: to.to_string(),
            event: event.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<String, String> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(step("pending", "resolved", "RESOLVE"));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn push_appends_in_place() {
        let mut history = StateHistory::new();
        history.push(step("green", "yellow", "TIMER"));
        history.push(step("yellow", "red", "TIMER"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get_path(), vec!["green", "yellow", "red"]);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(step("green", "yellow", "TIMER"))
            .record(step("yellow", "red", "TIMER"));

        let path = history.get_path();
        assert_eq!(path, vec!["green", "yellow", "red"]);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let history = StateHistory::new().record(step("a", "b", "GO"));

        std::thread::sleep(std::time::Duration::from_millis(10));

        let history = history.record(step("b", "c", "GO"));

        let duration = history.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history = StateHistory::new().record(step("a", "b", "GO"));
        assert_eq!(history.duration(), Some(std::time::Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(step("pending", "rejected", "REJECT"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<String, String> = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
