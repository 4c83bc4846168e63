//! Typed notification keys.
//!
//! Internally the machine talks about `(phase, state)` pairs. They are only
//! rendered to `"<phase>:<state>"` strings when handed to an event channel.

use super::state::{StateId, StateRegistry};
use std::fmt;

/// Which half of a transition, or the no-match case, a notification reports.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Phase {
    /// The machine is leaving the state.
    Leave,
    /// The machine has entered the state.
    Enter,
    /// An action had no effect from the state.
    Silent,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Leave, Phase::Enter, Phase::Silent];

    /// Prefix used in rendered event names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Leave => "leave",
            Self::Enter => "enter",
            Self::Silent => "silent",
        }
    }

    /// Split an event name such as `"enter:running"` into its phase and
    /// state name.
    ///
    /// Splits at the first `:`, so state names may themselves contain
    /// colons. Returns `None` for an unknown prefix or a missing separator.
    ///
    /// # Example
    ///
    /// ```rust
    /// use transit::core::Phase;
    ///
    /// assert_eq!(Phase::parse_event_name("leave:idle"), Some((Phase::Leave, "idle")));
    /// assert_eq!(Phase::parse_event_name("idle"), None);
    /// ```
    pub fn parse_event_name(name: &str) -> Option<(Phase, &str)> {
        let (prefix, state) = name.split_once(':')?;
        let phase = Phase::ALL.into_iter().find(|p| p.as_str() == prefix)?;
        Some((phase, state))
    }

    /// Render the channel-level event name for a state name.
    pub fn event_name(self, state: &str) -> String {
        format!("{}:{}", self.as_str(), state)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification key: a phase applied to one state of one machine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EventKey {
    pub phase: Phase,
    pub state: StateId,
}

impl EventKey {
    pub fn new(phase: Phase, state: StateId) -> Self {
        Self { phase, state }
    }

    /// Render to the channel-level name using the owning registry.
    ///
    /// Returns `None` if `state` is not registered there.
    pub fn render(&self, states: &StateRegistry) -> Option<String> {
        states
            .name_of(self.state)
            .map(|name| self.phase.event_name(name))
    }
}
