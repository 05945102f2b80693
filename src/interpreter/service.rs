//! Interpreter that runs one instance of a machine.

use crate::core::{Event, Machine, StateHistory, StateTransition, Symbol};
use crate::interpreter::snapshot::{Snapshot, Status};
use chrono::Utc;
use std::sync::Arc;

/// Callback invoked with each new snapshot.
pub type Observer<S, E> = Box<dyn FnMut(&Snapshot<S, E>) + Send>;

/// Stateful runtime executing one machine definition.
///
/// All work happens synchronously on the caller's stack: `start` and `send`
/// resolve the transition and run every observer before returning. Observer
/// panics are not caught.
///
/// Mutation requires `&mut self`, so callers sharing an interpreter across
/// threads must wrap it in their own lock.
pub struct Interpreter<S: Symbol, E: Symbol> {
    machine: Arc<Machine<S, E>>,
    snapshot: Option<Snapshot<S, E>>,
    status: Status,
    observers: Vec<Observer<S, E>>,
    done_listeners: Vec<Observer<S, E>>,
    history: StateHistory<S, E>,
}

impl<S: Symbol, E: Symbol> Interpreter<S, E> {
    /// Bind a new interpreter to `machine`. Nothing is entered until `start`.
    pub fn new(machine: Arc<Machine<S, E>>) -> Self {
        Self {
            machine,
            snapshot: None,
            status: Status::NotStarted,
            observers: Vec::new(),
            done_listeners: Vec::new(),
            history: StateHistory::new(),
        }
    }

    /// Rebuild a running or stopped interpreter without notifying anyone.
    pub(crate) fn restore(
        machine: Arc<Machine<S, E>>,
        status: Status,
        snapshot: Option<Snapshot<S, E>>,
        history: StateHistory<S, E>,
    ) -> Self {
        Self {
            machine,
            snapshot,
            status,
            observers: Vec::new(),
            done_listeners: Vec::new(),
            history,
        }
    }

    /// Register an observer for every state entry, including the initial one.
    ///
    /// Observers run in registration order. An observer registered while the
    /// interpreter is running is immediately called once with the current
    /// snapshot, then receives later transitions like any other. Registering
    /// before `start` or after the interpreter stopped replays nothing.
    pub fn on_transition<F>(&mut self, mut observer: F) -> &mut Self
    where
        F: FnMut(&Snapshot<S, E>) + Send + 'static,
    {
        if self.status == Status::Running {
            if let Some(snapshot) = &self.snapshot {
                observer(snapshot);
            }
        }
        self.observers.push(Box::new(observer));
        self
    }

    /// Register a listener called once when a final state is entered.
    ///
    /// Done listeners run after all transition observers.
    pub fn on_done<F>(&mut self, listener: F) -> &mut Self
    where
        F: FnMut(&Snapshot<S, E>) + Send + 'static,
    {
        self.done_listeners.push(Box::new(listener));
        self
    }

    /// Enter the initial state and notify observers.
    ///
    /// Only the first call has an effect; restarts are not supported.
    pub fn start(&mut self) -> &mut Self {
        if self.status != Status::NotStarted {
            tracing::debug!(
                machine = %self.machine.id(),
                status = ?self.status,
                "start ignored, interpreter already started"
            );
            return self;
        }

        let initial = self.machine.initial().clone();
        let done = self.machine.is_final(&initial);
        tracing::debug!(
            machine = %self.machine.id(),
            state = %initial.name(),
            "interpreter started"
        );

        self.status = Status::Running;
        self.enter(Snapshot::initial(initial, done));
        self
    }

    /// Send an event to the machine.
    ///
    /// Returns `true` if a transition fired. Unmatched events, and any event
    /// sent before `start` or after the interpreter stopped, are dropped.
    pub fn send(&mut self, event: impl Into<Event<E>>) -> bool {
        let event = event.into();

        if self.status != Status::Running {
            tracing::trace!(
                machine = %self.machine.id(),
                event = %event.kind.name(),
                status = ?self.status,
                "event ignored, interpreter not running"
            );
            return false;
        }

        let Some(current) = self.snapshot.as_ref().map(|snapshot| &snapshot.value) else {
            return false;
        };

        let Some(target) = self.machine.transition(current, &event).cloned() else {
            tracing::trace!(
                machine = %self.machine.id(),
                state = %current.name(),
                event = %event.kind.name(),
                "event ignored, no transition"
            );
            return false;
        };
        let from = current.clone();

        tracing::debug!(
            machine = %self.machine.id(),
            from = %from.name(),
            to = %target.name(),
            event = %event.kind.name(),
            "transition"
        );

        self.history.push(StateTransition {
            from: from.clone(),
            to: target.clone(),
            event: event.kind.clone(),
            timestamp: Utc::now(),
        });

        let done = self.machine.is_final(&target);
        self.enter(Snapshot::after(from, event, target, done));
        true
    }

    /// Send events in order, returning how many caused a transition.
    ///
    /// Events after the interpreter stops are dropped like any other.
    pub fn send_all<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Event<E>>,
    {
        let mut fired = 0;
        for event in events {
            if self.send(event) {
                fired += 1;
            }
        }
        fired
    }

    /// Stop the interpreter. Idempotent, and never notifies observers.
    pub fn stop(&mut self) {
        if self.status != Status::Stopped {
            tracing::debug!(machine = %self.machine.id(), "interpreter stopped");
        }
        self.status = Status::Stopped;
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Current state value, `None` before `start`.
    pub fn state(&self) -> Option<&S> {
        self.snapshot.as_ref().map(|snapshot| &snapshot.value)
    }

    pub fn snapshot(&self) -> Option<&Snapshot<S, E>> {
        self.snapshot.as_ref()
    }

    /// True once a final state has been entered.
    pub fn is_done(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|snapshot| snapshot.done)
    }

    pub fn history(&self) -> &StateHistory<S, E> {
        &self.history
    }

    pub fn machine(&self) -> &Arc<Machine<S, E>> {
        &self.machine
    }

    /// Whether sending an event of this type now would cause a transition.
    pub fn can(&self, event: &E) -> bool {
        self.status == Status::Running
            && self
                .state()
                .is_some_and(|state| self.machine.transition_for(state, event).is_some())
    }

    /// Event types that would cause a transition now.
    pub fn next_events(&self) -> Vec<&E> {
        match (self.status, self.state()) {
            (Status::Running, Some(state)) => self.machine.events_from(state),
            _ => Vec::new(),
        }
    }

    fn enter(&mut self, snapshot: Snapshot<S, E>) {
        let snapshot = &*self.snapshot.insert(snapshot);

        for observer in &mut self.observers {
            observer(snapshot);
        }

        if snapshot.done {
            for listener in &mut self.done_listeners {
                listener(snapshot);
            }
            self.status = Status::Stopped;
            tracing::debug!(
                machine = %self.machine.id(),
                state = %snapshot.value.name(),
                "final state reached, interpreter stopped"
            );
        }
    }
}

/// Create an interpreter for `machine`.
///
/// The definition is shared, not owned: clone the `Arc` to run several
/// instances of one machine.
pub fn interpret<S: Symbol, E: Symbol>(machine: Arc<Machine<S, E>>) -> Interpreter<S, E> {
    Interpreter::new(machine)
}
