//! Definition errors.

use thiserror::Error;

/// A single problem found while validating a machine definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("initial state not specified")]
    MissingInitialState,

    #[error("initial state '{initial}' is not a declared state")]
    UnknownInitialState { initial: String },

    #[error("transition from '{from}' on '{event}' targets undeclared state '{target}'")]
    UnknownTarget {
        from: String,
        event: String,
        target: String,
    },

    #[error("transition source '{from}' is not a declared state")]
    UnknownSource { from: String },

    #[error("final state '{state}' declares outgoing transitions")]
    FinalStateHasTransitions { state: String },

    #[error("duplicate transition from '{from}' on '{event}'")]
    DuplicateTransition { from: String, event: String },

    #[error("state '{state}' declared both as ordinary and as final")]
    ConflictingStateKind { state: String },
}

/// Errors raised while constructing a machine definition.
///
/// Not recoverable by an interpreter; the definition has to be fixed.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("invalid machine '{machine}': {}", join_violations(.violations))]
    Invalid {
        machine: String,
        violations: Vec<Violation>,
    },

    #[error("failed to parse machine config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DefinitionError {
    /// All violations behind an `Invalid` error; empty for parse failures.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Invalid { violations, .. } => violations,
            Self::Parse(_) => &[],
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
