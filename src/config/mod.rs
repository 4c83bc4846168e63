//! Factory input for [`Machine::create`](crate::Machine::create).
//!
//! The data half (`initial`, `transits`) deserializes from JSON; the
//! callbacks in `events` are attached in code.
//!
//! # Example
//!
//! ```rust
//! use transit::config::MachineConfig;
//! use transit::Machine;
//!
//! let config = MachineConfig::from_json(r#"{
//!     "initial": "idle",
//!     "transits": [
//!         { "action": "start", "prev": "idle", "next": "running" },
//!         { "action": "stop", "prev": "running", "next": "idle" }
//!     ]
//! }"#).unwrap();
//!
//! assert!(config.validate().is_success());
//!
//! let mut machine = Machine::create(config);
//! machine.fire("start", false);
//! assert_eq!(machine.state(), "running");
//! ```

pub mod error;

pub use error::{ConfigError, ConfigViolation};

use crate::channel::Callback;
use crate::core::Phase;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// One `(action, prev) -> next` row. A missing `prev` means `"none"`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Transit {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    pub next: String,
}

impl Transit {
    pub fn new(action: impl Into<String>, prev: Option<&str>, next: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            prev: prev.map(str::to_string),
            next: next.into(),
        }
    }
}

/// A callback to subscribe under an event name such as `"leave:idle"`.
#[derive(Clone)]
pub struct EventBinding {
    pub name: String,
    pub callback: Callback,
}

impl EventBinding {
    pub fn new<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            callback: Arc::new(callback),
        }
    }
}

impl fmt::Debug for EventBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBinding")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Everything needed to construct a machine.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Starting state; `"none"` when absent.
    #[serde(default)]
    pub initial: Option<String>,
    #[serde(default)]
    pub transits: Vec<Transit>,
    #[serde(skip)]
    pub events: Vec<EventBinding>,
}

impl MachineConfig {
    /// Parse the data half from JSON. `events` starts empty.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the data half to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the config, accumulating every violation instead of stopping
    /// at the first.
    ///
    /// The machine itself accepts anything; this is for callers who want
    /// typos caught early.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        if let Some(initial) = &self.initial {
            checks.push(check(!initial.is_empty(), || ConfigViolation::EmptyInitial));
        }

        for (index, transit) in self.transits.iter().enumerate() {
            checks.push(check(!transit.action.is_empty(), || {
                ConfigViolation::EmptyAction { index }
            }));
            if let Some(prev) = &transit.prev {
                checks.push(check(!prev.is_empty(), || ConfigViolation::EmptyState {
                    index,
                    field: "prev",
                }));
            }
            checks.push(check(!transit.next.is_empty(), || {
                ConfigViolation::EmptyState {
                    index,
                    field: "next",
                }
            }));
        }

        for binding in &self.events {
            let known = Phase::parse_event_name(&binding.name)
                .is_some_and(|(_, state)| !state.is_empty());
            checks.push(check(known, || ConfigViolation::UnknownEvent {
                name: binding.name.clone(),
            }));
        }

        if checks.is_empty() {
            return Validation::success(());
        }
        Validation::all_vec(checks).map(|_| ())
    }
}

fn check<F>(ok: bool, violation: F) -> Validation<(), NonEmptyVec<ConfigViolation>>
where
    F: FnOnce() -> ConfigViolation,
{
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violations(config: &MachineConfig) -> Vec<ConfigViolation> {
        match config.validate() {
            Validation::Failure(errors) => errors.iter().cloned().collect(),
            Validation::Success(_) => Vec::new(),
        }
    }

    #[test]
    fn parses_factory_shape() {
        let config = MachineConfig::from_json(
            r#"{
                "initial": "idle",
                "transits": [
                    { "action": "boot", "next": "idle" },
                    { "action": "start", "prev": "idle", "next": "running" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.initial.as_deref(), Some("idle"));
        assert_eq!(config.transits.len(), 2);
        assert_eq!(config.transits[0].prev, None);
        assert_eq!(config.transits[1], Transit::new("start", Some("idle"), "running"));
        assert!(config.events.is_empty());
    }

    #[test]
    fn empty_object_is_a_valid_config() {
        let config = MachineConfig::from_json("{}").unwrap();

        assert_eq!(config.initial, None);
        assert!(config.transits.is_empty());
        assert!(config.validate().is_success());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let result = MachineConfig::from_json(r#"{ "transits": [ { "action": "x" } ] }"#);

        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn to_json_omits_missing_prev() {
        let config = MachineConfig {
            initial: Some("idle".to_string()),
            transits: vec![Transit::new("boot", None, "idle")],
            events: Vec::new(),
        };

        let json = config.to_json().unwrap();

        assert!(!json.contains("prev"));
        let parsed = MachineConfig::from_json(&json).unwrap();
        assert_eq!(parsed.transits, config.transits);
    }

    #[test]
    fn validate_accumulates_all_violations() {
        let config = MachineConfig {
            initial: Some(String::new()),
            transits: vec![
                Transit::new("", Some("idle"), "running"),
                Transit::new("stop", Some(""), ""),
            ],
            events: vec![
                EventBinding::new("enter:running", |_| {}),
                EventBinding::new("exit:running", |_| {}),
                EventBinding::new("leave:", |_| {}),
            ],
        };

        let found = violations(&config);

        assert_eq!(found.len(), 6);
        assert!(found.contains(&ConfigViolation::EmptyInitial));
        assert!(found.contains(&ConfigViolation::EmptyAction { index: 0 }));
        assert!(found.contains(&ConfigViolation::EmptyState { index: 1, field: "prev" }));
        assert!(found.contains(&ConfigViolation::EmptyState { index: 1, field: "next" }));
        assert!(found.contains(&ConfigViolation::UnknownEvent {
            name: "exit:running".to_string()
        }));
        assert!(found.contains(&ConfigViolation::UnknownEvent {
            name: "leave:".to_string()
        }));
    }

    #[test]
    fn binding_debug_hides_callback() {
        let binding = EventBinding::new("leave:idle", |_| {});
        let rendered = format!("{binding:?}");

        assert!(rendered.contains("leave:idle"));
        assert!(rendered.contains(".."));
    }
}
