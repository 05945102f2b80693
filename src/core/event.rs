//! Events sent to a running interpreter.

use super::symbol::Symbol;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An event: a required type discriminator plus an optional payload.
///
/// Only `kind` takes part in transition resolution. The payload travels
/// with the event into the [`Snapshot`] handed to observers.
///
/// [`Snapshot`]: crate::interpreter::Snapshot
///
/// # Example
///
/// ```rust
/// use fsmlite::core::Event;
/// use serde_json::json;
///
/// let event = Event::new("RESOLVE".to_string()).with_payload(json!({ "value": 42 }));
/// assert_eq!(event.kind, "RESOLVE");
/// assert_eq!(event.payload, Some(json!({ "value": 42 })));
///
/// let bare: Event<String> = "REJECT".into();
/// assert!(bare.payload.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Event<E: Symbol> {
    /// The event type used to look up a transition
    #[serde(rename = "type")]
    pub kind: E,
    /// Optional data carried by the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl<E: Symbol> Event<E> {
    /// Create an event without payload.
    pub fn new(kind: E) -> Self {
        Self {
            kind,
            payload: None,
        }
    }

    /// Attach a payload, replacing any existing one.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

impl<E: Symbol> From<E> for Event<E> {
    fn from(kind: E) -> Self {
        Self::new(kind)
    }
}

impl From<&str> for Event<String> {
    fn from(kind: &str) -> Self {
        Self::new(kind.to_string())
    }
}
