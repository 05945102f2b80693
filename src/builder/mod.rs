//! Builder API for ergonomic machine construction.
//!
//! This module provides a fluent builder and a macro for declaring machines
//! in code with minimal boilerplate, as an alternative to a
//! [`MachineConfig`](crate::core::MachineConfig).

pub mod machine;
pub mod macros;

pub use machine::MachineBuilder;
