//! Build errors for the machine builder.

use crate::config::{ConfigError, ConfigViolation};
use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid machine definition: {}", summarize(.0))]
    Invalid(Vec<ConfigViolation>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn summarize(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
