//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::config::{EventBinding, MachineConfig, Transit};
use crate::engine::{DroppedHook, Machine};
use std::sync::Arc;
use stillwater::validation::Validation;

/// Builder for constructing machines with a fluent API.
///
/// Unlike [`Machine::create`], `build` validates the definition and
/// reports every problem at once.
#[derive(Default)]
pub struct MachineBuilder {
    config: MachineConfig,
    on_dropped: Option<DroppedHook>,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing config.
    pub fn from_config(config: MachineConfig) -> Self {
        Self {
            config,
            on_dropped: None,
        }
    }

    /// Start from a JSON config.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        Ok(Self::from_config(MachineConfig::from_json(json)?))
    }

    /// Set the initial state. Defaults to `"none"`.
    pub fn initial(mut self, state: &str) -> Self {
        self.config.initial = Some(state.to_string());
        self
    }

    /// Add one transition.
    pub fn transit(mut self, action: &str, prev: Option<&str>, next: &str) -> Self {
        self.config.transits.push(Transit::new(action, prev, next));
        self
    }

    /// Add multiple transitions at once.
    pub fn transits(mut self, transits: Vec<Transit>) -> Self {
        self.config.transits.extend(transits);
        self
    }

    /// Subscribe a callback once the machine is built.
    pub fn on<F>(mut self, name: &str, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.config.events.push(EventBinding::new(name, callback));
        self
    }

    /// Install a hook for actions dropped while a transition is pending.
    pub fn on_dropped<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_dropped = Some(Arc::new(hook));
        self
    }

    /// The definition collected so far.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Validate and build the machine.
    pub fn build(self) -> Result<Machine, BuildError> {
        if let Validation::Failure(violations) = self.config.validate() {
            return Err(BuildError::Invalid(violations.iter().cloned().collect()));
        }

        let mut machine = Machine::create(self.config);
        machine.set_dropped_hook(self.on_dropped);
        Ok(machine)
    }
}
