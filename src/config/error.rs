//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed into a config
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single problem found by `MachineConfig::validate`
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("Initial state name is empty")]
    EmptyInitial,

    #[error("Transit #{index} has an empty action")]
    EmptyAction { index: usize },

    #[error("Transit #{index} has an empty '{field}' state")]
    EmptyState { index: usize, field: &'static str },

    #[error("Event '{name}' is not of the form leave:<state>, enter:<state> or silent:<state>")]
    UnknownEvent { name: String },
}
