//! Transition lookup keyed by action and previous state.

use super::state::{StateId, StateRegistry, NONE};
use std::collections::HashMap;
use tracing::trace;

/// Maps `(action, previous state) -> next state`.
///
/// Each action owns a sparse map from previous-state index to next-state
/// index. A missing action and a missing entry under a known action both
/// mean the same thing: the action has no effect from that state.
///
/// # Example
///
/// ```rust
/// use transit::core::{StateRegistry, TransitionTable};
///
/// let mut states = StateRegistry::new();
/// let mut table = TransitionTable::new();
///
/// let (idle, running) = table.add(&mut states, "start", Some("idle"), "running");
///
/// assert_eq!(table.lookup("start", idle), Some(running));
/// assert_eq!(table.lookup("start", running), None);
/// assert_eq!(table.lookup("stop", idle), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    actions: HashMap<String, HashMap<StateId, StateId>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve both names and record the transition.
    ///
    /// A missing or empty `prev` means [`NONE`]. Unknown names are
    /// registered on the way in. Returns the resolved `(from, to)` pair.
    pub fn add(
        &mut self,
        states: &mut StateRegistry,
        action: &str,
        prev: Option<&str>,
        next: &str,
    ) -> (StateId, StateId) {
        let from = states.resolve(prev.filter(|p| !p.is_empty()).unwrap_or(NONE));
        let to = states.resolve(next);
        self.insert(action, from, to);
        (from, to)
    }

    /// Record `action: from -> to`, returning the target it replaced.
    ///
    /// Last write wins.
    pub fn insert(&mut self, action: &str, from: StateId, to: StateId) -> Option<StateId> {
        let replaced = self
            .actions
            .entry(action.to_string())
            .or_default()
            .insert(from, to);
        trace!(action, from = from.index(), to = to.index(), ?replaced, "transition added");
        replaced
    }

    /// Target of `action` from `from`, if one is defined.
    pub fn lookup(&self, action: &str, from: StateId) -> Option<StateId> {
        self.actions.get(action)?.get(&from).copied()
    }

    /// Actions that have an entry for `from`, in no particular order.
    pub fn actions_from(&self, from: StateId) -> impl Iterator<Item = &str> + '_ {
        self.actions
            .iter()
            .filter(move |(_, targets)| targets.contains_key(&from))
            .map(|(action, _)| action.as_str())
    }

    /// Number of `(action, from)` entries.
    pub fn len(&self) -> usize {
        self.actions.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
