//! Symbol trait for naming states and event types.
//!
//! A machine is generic over two symbol types: one naming its states and one
//! naming the kinds of events it reacts to. Strings work out of the box;
//! closed sets of names are better expressed as enums via [`symbol_enum!`].
//!
//! [`symbol_enum!`]: crate::symbol_enum

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identifiers and event types.
///
/// Symbols are opaque, comparable tokens. They are used as hash keys in the
/// transition table, so equality and hashing must agree.
///
/// # Required Traits
///
/// - `Clone` + `Eq` + `Hash`: symbols are table keys
/// - `Debug`: symbols are debuggable for diagnostics
/// - `Serialize` + `Deserialize`: symbols appear in configs and checkpoints
/// - `Send` + `Sync`: definitions are shared across threads
///
/// # Example
///
/// ```rust
/// use fsmlite::core::Symbol;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Light {
///     Red,
///     Green,
/// }
///
/// impl Symbol for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Red => "Red",
///             Self::Green => "Green",
///         }
///     }
/// }
///
/// assert_eq!(Light::Green.name(), "Green");
/// assert_eq!("pending".to_string().name(), "pending");
/// ```
pub trait Symbol:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the symbol's name for display/logging.
    fn name(&self) -> &str;
}

impl Symbol for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Phase {
        Pending,
        Resolved,
    }

    impl Symbol for Phase {
        fn name(&self) -> &str {
            match self {
                Self::Pending => "Pending",
                Self::Resolved => "Resolved",
            }
        }
    }

    #[test]
    fn string_symbol_name_is_the_string() {
        let state = String::from("pending");
        assert_eq!(state.name(), "pending");
    }

    #[test]
    fn enum_symbol_name_returns_correct_value() {
        assert_eq!(Phase::Pending.name(), "Pending");
        assert_eq!(Phase::Resolved.name(), "Resolved");
    }

    #[test]
    fn symbols_work_as_map_keys() {
        let mut table = HashMap::new();
        table.insert(Phase::Pending, 1);
        table.insert(Phase::Resolved, 2);

        assert_eq!(table.get(&Phase::Pending), Some(&1));
        assert_eq!(table.get(&Phase::Resolved), Some(&2));
    }

    #[test]
    fn symbol_serializes_correctly() {
        let json = serde_json::to_string(&Phase::Resolved).unwrap();
        let deserialized: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Phase::Resolved);
    }
}
