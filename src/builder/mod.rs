//! Builder API for ergonomic machine construction.
//!
//! This module provides a fluent builder and the [`transits!`](crate::transits)
//! macro for declaring transition tables with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;
