//! Checkpoint and resume functionality for interpreters.
//!
//! A checkpoint captures where an interpreter is (status, current state and
//! transition history) so a long-lived machine instance can survive a
//! process restart. Observers are closures and are not persisted; register
//! them again on the resumed interpreter.

use crate::core::{Machine, StateHistory, Symbol};
use crate::interpreter::{Interpreter, Snapshot, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of interpreter state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: Symbol, E: Symbol> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Id of the machine the interpreter was running
    pub machine_id: String,

    pub status: Status,

    /// Current state; `None` if the interpreter was never started
    pub current_state: Option<S>,

    /// Complete transition history
    pub history: StateHistory<S, E>,
}

impl<S: Symbol, E: Symbol> Checkpoint<S, E> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

impl<S: Symbol, E: Symbol> Interpreter<S, E> {
    /// Capture the interpreter's current position.
    pub fn checkpoint(&self) -> Checkpoint<S, E> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            machine_id: self.machine().id().to_string(),
            status: self.status(),
            current_state: self.state().cloned(),
            history: self.history().clone(),
        }
    }

    /// Rebuild an interpreter from a checkpoint.
    ///
    /// No observer is notified. The resumed interpreter has no observers; one
    /// registered while it is running receives the current state right away.
    pub fn resume(
        machine: Arc<Machine<S, E>>,
        checkpoint: Checkpoint<S, E>,
    ) -> Result<Self, CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if checkpoint.machine_id != machine.id() {
            return Err(CheckpointError::MachineMismatch {
                expected: machine.id().to_string(),
                found: checkpoint.machine_id,
            });
        }

        check_history(&machine, &checkpoint)?;

        let snapshot = match (checkpoint.status, checkpoint.current_state) {
            (Status::NotStarted, None) => None,
            (Status::NotStarted, Some(_)) => {
                return Err(CheckpointError::ValidationFailed(
                    "not started interpreter has a current state".to_string(),
                ))
            }
            (Status::Running, None) => {
                return Err(CheckpointError::ValidationFailed(
                    "running interpreter has no current state".to_string(),
                ))
            }
            // stop() before start() leaves no state behind
            (Status::Stopped, None) => None,
            (status, Some(state)) => {
                if !machine.has_state(&state) {
                    return Err(CheckpointError::UnknownState {
                        state: state.name().to_string(),
                    });
                }
                let done = machine.is_final(&state);
                if done && status == Status::Running {
                    return Err(CheckpointError::ValidationFailed(format!(
                        "running interpreter is in final state '{}'",
                        state.name()
                    )));
                }
                let previous = checkpoint
                    .history
                    .transitions()
                    .last()
                    .map(|transition| transition.from.clone());
                Some(Snapshot {
                    changed: previous.as_ref() != Some(&state),
                    value: state,
                    event: None,
                    previous,
                    done,
                })
            }
        };

        tracing::debug!(
            machine = %machine.id(),
            checkpoint = %checkpoint.id,
            status = ?checkpoint.status,
            "interpreter resumed from checkpoint"
        );

        Ok(Self::restore(
            machine,
            checkpoint.status,
            snapshot,
            checkpoint.history,
        ))
    }
}

/// The restored history must only mention declared states, form one
/// connected path, and end where the checkpoint says the interpreter is.
fn check_history<S: Symbol, E: Symbol>(
    machine: &Machine<S, E>,
    checkpoint: &Checkpoint<S, E>,
) -> Result<(), CheckpointError> {
    let transitions = checkpoint.history.transitions();

    for transition in transitions {
        for state in [&transition.from, &transition.to] {
            if !machine.has_state(state) {
                return Err(CheckpointError::ValidationFailed(format!(
                    "history mentions undeclared state '{}'",
                    state.name()
                )));
            }
        }
    }

    if transitions.windows(2).any(|pair| pair[0].to != pair[1].from) {
        return Err(CheckpointError::ValidationFailed(
            "history is not a connected path".to_string(),
        ));
    }

    if let Some(last) = transitions.last() {
        if checkpoint.current_state.as_ref() != Some(&last.to) {
            return Err(CheckpointError::ValidationFailed(format!(
                "history ends in '{}' but current state differs",
                last.to.name()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MachineBuilder;
    use crate::core::StateTransition;
    use crate::interpret;
    use std::sync::Mutex;

    fn s(name: &str) -> String {
        name.to_string()
    }

    fn traffic_light() -> Arc<Machine<String, String>> {
        Arc::new(
            MachineBuilder::new()
                .id("light")
                .initial(s("green"))
                .states([s("green"), s("yellow"), s("red")])
                .final_state(s("off"))
                .transition(s("green"), s("TIMER"), s("yellow"))
                .transition(s("yellow"), s("TIMER"), s("red"))
                .transition(s("red"), s("TIMER"), s("green"))
                .transition(s("red"), s("POWER_OFF"), s("off"))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn checkpoint_captures_position() {
        let mut service = interpret(traffic_light());
        service.start();
        service.send_all(["TIMER", "TIMER"]);

        let checkpoint = service.checkpoint();
        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert_eq!(checkpoint.machine_id, "light");
        assert_eq!(checkpoint.status, Status::Running);
        assert_eq!(checkpoint.current_state.as_deref(), Some("red"));
        assert_eq!(checkpoint.history.len(), 2);
    }

    #[test]
    fn checkpoint_ids_are_unique() {
        let service = interpret(traffic_light());
        assert_ne!(service.checkpoint().id, service.checkpoint().id);
    }

    #[test]
    fn resume_continues_where_it_left_off() {
        let mut service = interpret(traffic_light());
        service.start();
        service.send("TIMER");

        let json = service.checkpoint().to_json().unwrap();
        let checkpoint = Checkpoint::from_json(&json).unwrap();
        let mut resumed = Interpreter::resume(traffic_light(), checkpoint).unwrap();

        assert_eq!(resumed.status(), Status::Running);
        assert_eq!(resumed.state(), Some(&s("yellow")));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        resumed.on_transition(move |snap: &Snapshot<String, String>| {
            sink.lock().unwrap().push(snap.value.clone())
        });
        resumed.send("TIMER");

        assert_eq!(*seen.lock().unwrap(), vec![s("yellow"), s("red")]);
        assert_eq!(
            resumed.history().get_path(),
            vec!["green", "yellow", "red"]
        );
    }

    #[test]
    fn binary_checkpoint_restores_stopped_interpreter() {
        let mut service = interpret(traffic_light());
        service.start();
        service.send_all(["TIMER", "TIMER", "POWER_OFF"]);

        let bytes = service.checkpoint().to_bytes().unwrap();
        let checkpoint = Checkpoint::from_bytes(&bytes).unwrap();
        let mut resumed = Interpreter::resume(traffic_light(), checkpoint).unwrap();

        assert_eq!(resumed.status(), Status::Stopped);
        assert!(resumed.is_done());
        assert!(!resumed.send("TIMER"));
    }

    #[test]
    fn resume_rejects_other_machine() {
        let service = interpret(traffic_light());
        let mut checkpoint = service.checkpoint();
        checkpoint.machine_id = s("promise");

        let result = Interpreter::resume(traffic_light(), checkpoint);
        assert!(matches!(
            result,
            Err(CheckpointError::MachineMismatch { .. })
        ));
    }

    #[test]
    fn resume_rejects_unknown_version() {
        let service = interpret(traffic_light());
        let mut checkpoint = service.checkpoint();
        checkpoint.version = 99;

        let result = Interpreter::resume(traffic_light(), checkpoint);
        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion {
                found: 99,
                supported: 1
            })
        ));
    }

    #[test]
    fn resume_rejects_undeclared_state() {
        let mut service = interpret(traffic_light());
        service.start();
        let mut checkpoint = service.checkpoint();
        checkpoint.current_state = Some(s("blue"));

        let result = Interpreter::resume(traffic_light(), checkpoint);
        assert!(matches!(result, Err(CheckpointError::UnknownState { .. })));
    }

    #[test]
    fn resume_rejects_running_final_state() {
        let mut service = interpret(traffic_light());
        service.start();
        let mut checkpoint = service.checkpoint();
        checkpoint.current_state = Some(s("off"));

        let result = Interpreter::resume(traffic_light(), checkpoint);
        assert!(matches!(result, Err(CheckpointError::ValidationFailed(_))));
    }

    fn step(from: &str, to: &str) -> StateTransition<String, String> {
        StateTransition {
            from: s(from),
            to: s(to),
            event: s("TIMER"),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn resume_rejects_history_with_undeclared_states() {
        let mut service = interpret(traffic_light());
        service.start();
        service.send("TIMER");
        let mut checkpoint = service.checkpoint();
        checkpoint.history = StateHistory::new().record(step("blue", "yellow"));

        let result = Interpreter::resume(traffic_light(), checkpoint);
        assert!(matches!(result, Err(CheckpointError::ValidationFailed(_))));
    }

    #[test]
    fn resume_rejects_history_ending_elsewhere() {
        let mut service = interpret(traffic_light());
        service.start();
        service.send_all(["TIMER", "TIMER"]);
        let mut checkpoint = service.checkpoint();
        checkpoint.history = StateHistory::new().record(step("green", "yellow"));

        let result = Interpreter::resume(traffic_light(), checkpoint);
        assert!(matches!(result, Err(CheckpointError::ValidationFailed(_))));
    }

    #[test]
    fn resume_rejects_disconnected_history() {
        let mut service = interpret(traffic_light());
        service.start();
        service.send_all(["TIMER", "TIMER"]);
        let mut checkpoint = service.checkpoint();
        checkpoint.history = StateHistory::new()
            .record(step("green", "yellow"))
            .record(step("green", "red"));

        let result = Interpreter::resume(traffic_light(), checkpoint);
        assert!(matches!(result, Err(CheckpointError::ValidationFailed(_))));
    }

    #[test]
    fn resume_rejects_history_without_current_state() {
        let mut checkpoint = interpret(traffic_light()).checkpoint();
        checkpoint.history = StateHistory::new().record(step("green", "yellow"));

        let result = Interpreter::resume(traffic_light(), checkpoint);
        assert!(matches!(result, Err(CheckpointError::ValidationFailed(_))));
    }

    #[test]
    fn unstarted_interpreter_resumes_unstarted() {
        let checkpoint = interpret(traffic_light()).checkpoint();
        let mut resumed = Interpreter::resume(traffic_light(), checkpoint).unwrap();

        assert_eq!(resumed.status(), Status::NotStarted);
        resumed.start();
        assert_eq!(resumed.state(), Some(&s("green")));
    }

    #[test]
    fn malformed_json_is_a_deserialization_error() {
        let result = Checkpoint::<String, String>::from_json("not json");
        assert!(matches!(
            result,
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }
}
