//! State names and their stable integer indices.
//!
//! Every machine owns one [`StateRegistry`]. Names are interned on first
//! sight and never removed, so an index handed out once stays valid for the
//! lifetime of the machine.

use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Name of the implicit "no prior state" marker.
pub const NONE: &str = "none";

/// Index of a state inside one machine's registry.
///
/// Ids are only meaningful for the registry that produced them.
///
/// # Example
///
/// ```rust
/// use transit::core::{StateId, StateRegistry};
///
/// let mut states = StateRegistry::new();
/// let idle = states.resolve("idle");
///
/// assert_eq!(idle.index(), 1);
/// assert_eq!(states.resolve("none"), StateId::NONE);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct StateId(usize);

impl StateId {
    /// The id of [`NONE`], reserved at construction.
    pub const NONE: StateId = StateId(0);

    /// Wrap a raw index. Nothing checks that it is registered.
    pub fn from_index(index: usize) -> Self {
        StateId(index)
    }

    /// Raw index in first-seen order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bidirectional mapping between state names and indices.
///
/// The mapping is a bijection: each name has exactly one index and each
/// index names exactly one state. Indices are assigned in first-seen order;
/// index 0 is always [`NONE`].
#[derive(Clone, Debug)]
pub struct StateRegistry {
    names: Vec<String>,
    indices: HashMap<String, StateId>,
}

impl Default for StateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRegistry {
    /// Create a registry holding only the [`NONE`] sentinel.
    pub fn new() -> Self {
        let mut indices = HashMap::new();
        indices.insert(NONE.to_string(), StateId::NONE);
        Self {
            names: vec![NONE.to_string()],
            indices,
        }
    }

    /// Return the index for `name`, registering it if it is new.
    ///
    /// Known names keep their index; a new name gets the next free one
    /// (the current registry size).
    pub fn resolve(&mut self, name: &str) -> StateId {
        if let Some(id) = self.indices.get(name) {
            return *id;
        }

        let id = StateId(self.names.len());
        self.names.push(name.to_string());
        self.indices.insert(name.to_string(), id);
        trace!(state = name, index = id.0, "registered state");
        id
    }

    /// Look up a name without registering it.
    pub fn get(&self, name: &str) -> Option<StateId> {
        self.indices.get(name).copied()
    }

    /// Name for a known index. Unknown indices yield `None`, not an error.
    pub fn name_of(&self, id: StateId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }

    /// Number of registered states, including [`NONE`].
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: the sentinel is registered from the start.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All states in index order.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (StateId(index), name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_preregistered_at_zero() {
        let states = StateRegistry::new();

        assert_eq!(states.len(), 1);
        assert!(!states.is_empty());
        assert_eq!(states.get(NONE), Some(StateId::NONE));
        assert_eq!(states.name_of(StateId::NONE), Some(NONE));
    }

    #[test]
    fn resolve_assigns_first_seen_order() {
        let mut states = StateRegistry::new();

        let idle = states.resolve("idle");
        let running = states.resolve("running");

        assert_eq!(idle.index(), 1);
        assert_eq!(running.index(), 2);
        assert_eq!(states.len(), 3);
    }

    #[test]
    fn resolve_is_stable_for_known_names() {
        let mut states = StateRegistry::new();

        let first = states.resolve("idle");
        states.resolve("running");
        let second = states.resolve("idle");

        assert_eq!(first, second);
        assert_eq!(states.len(), 3);
    }

    #[test]
    fn resolving_none_does_not_grow() {
        let mut states = StateRegistry::new();

        assert_eq!(states.resolve(NONE), StateId::NONE);
        assert_eq!(states.len(), 1);
    }

    #[test]
    fn name_of_unknown_index_is_none() {
        let states = StateRegistry::new();

        assert_eq!(states.name_of(StateId(7)), None);
    }

    #[test]
    fn get_does_not_register() {
        let states = StateRegistry::new();

        assert_eq!(states.get("idle"), None);
        assert_eq!(states.len(), 1);
    }

    #[test]
    fn iter_walks_index_order() {
        let mut states = StateRegistry::new();
        states.resolve("a");
        states.resolve("b");

        let names: Vec<&str> = states.iter().map(|(_, name)| name).collect();

        assert_eq!(names, vec![NONE, "a", "b"]);
    }
}
