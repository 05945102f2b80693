//! Ready-made transition observers.
//!
//! The interpreter itself performs no output. Anything that should happen on
//! every transition, logging included, is registered explicitly with
//! [`Interpreter::on_transition`](crate::interpreter::Interpreter::on_transition).

use crate::core::Symbol;
use crate::interpreter::Snapshot;
use std::sync::{Arc, Mutex, PoisonError};

/// Observer emitting one `tracing` event per state entry.
///
/// # Example
///
/// ```rust
/// use fsmlite::{interpret, observers, MachineBuilder};
/// use std::sync::Arc;
///
/// let machine = MachineBuilder::<String, String>::new()
///     .id("door")
///     .initial("closed".to_string())
///     .states(["closed".to_string(), "open".to_string()])
///     .transition("closed".to_string(), "OPEN".to_string(), "open".to_string())
///     .build()
///     .unwrap();
///
/// let mut service = interpret(Arc::new(machine));
/// service
///     .on_transition(observers::log_transitions::<String, String>("door"))
///     .start();
/// service.send("OPEN");
/// ```
pub fn log_transitions<S, E>(machine_id: &str) -> impl FnMut(&Snapshot<S, E>) + Send + 'static
where
    S: Symbol + 'static,
    E: Symbol + 'static,
{
    let machine = machine_id.to_string();
    move |snapshot: &Snapshot<S, E>| {
        tracing::info!(
            machine = %machine,
            state = %snapshot.value.name(),
            event = snapshot.event.as_ref().map(|event| event.kind.name()),
            changed = snapshot.changed,
            done = snapshot.done,
            "state entered"
        );
    }
}

/// Observer collecting every entered state into a shared vector.
///
/// Handy for tests and for replaying a run after the fact. A poisoned sink
/// is still written to; no entry is dropped.
pub fn collect_states<S, E>(
    sink: Arc<Mutex<Vec<S>>>,
) -> impl FnMut(&Snapshot<S, E>) + Send + 'static
where
    S: Symbol + 'static,
    E: Symbol + 'static,
{
    move |snapshot: &Snapshot<S, E>| {
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot.value.clone());
    }
}
