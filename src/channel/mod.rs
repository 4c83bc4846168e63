//! Publish/subscribe seam between a machine and its observers.
//!
//! A machine announces `leave:<state>`, `enter:<state>` and `silent:<state>`
//! through an [`EventChannel`]. [`EventBus`] is the in-process default:
//! synchronous fan-out to subscribers in subscription order.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use transit::channel::{EventBus, EventChannel};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! let mut bus = EventBus::new();
//! let id = bus.on("enter:running", Arc::new(move |action: &str| {
//!     sink.lock().unwrap().push(action.to_string());
//! }));
//!
//! assert_eq!(bus.emit("enter:running", "start"), 1);
//! assert!(bus.off("enter:running", id));
//! assert_eq!(bus.emit("enter:running", "start"), 0);
//! assert_eq!(*seen.lock().unwrap(), vec!["start".to_string()]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Observer callback, invoked with the triggering action.
pub type Callback = Arc<dyn Fn(&str) + Send + Sync>;

/// Handle returned by [`EventChannel::on`], used to unsubscribe.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Synchronous publish/subscribe bus owned by one machine.
pub trait EventChannel {
    /// Subscribe `callback` to `name`.
    fn on(&mut self, name: &str, callback: Callback) -> SubscriptionId;

    /// Remove a subscription. Returns whether anything was removed.
    fn off(&mut self, name: &str, id: SubscriptionId) -> bool;

    /// Remove every subscription of this exact callback (same `Arc`) under
    /// `name`. Returns whether anything was removed.
    fn off_callback(&mut self, name: &str, callback: &Callback) -> bool;

    /// Invoke every subscriber of `name` with `action`, in subscription
    /// order. Returns how many were invoked.
    fn emit(&self, name: &str, action: &str) -> usize;
}

/// Default in-process [`EventChannel`].
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: HashMap<String, Vec<(SubscriptionId, Callback)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions on `name`.
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.subscribers.get(name).map_or(0, Vec::len)
    }
}

impl EventChannel for EventBus {
    fn on(&mut self, name: &str, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.subscribers
            .entry(name.to_string())
            .or_default()
            .push((id, callback));
        id
    }

    fn off(&mut self, name: &str, id: SubscriptionId) -> bool {
        let Some(list) = self.subscribers.get_mut(name) else {
            return false;
        };

        let before = list.len();
        list.retain(|(sub, _)| *sub != id);
        let removed = list.len() != before;

        if list.is_empty() {
            self.subscribers.remove(name);
        }
        removed
    }

    fn off_callback(&mut self, name: &str, callback: &Callback) -> bool {
        let Some(list) = self.subscribers.get_mut(name) else {
            return false;
        };

        let before = list.len();
        list.retain(|(_, cb)| !Arc::ptr_eq(cb, callback));
        let removed = list.len() != before;

        if list.is_empty() {
            self.subscribers.remove(name);
        }
        removed
    }

    fn emit(&self, name: &str, action: &str) -> usize {
        let Some(list) = self.subscribers.get(name) else {
            return 0;
        };

        for (_, callback) in list {
            callback(action);
        }
        list.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .subscribers
            .iter()
            .map(|(name, list)| (name.as_str(), list.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("subscribers", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> Callback {
        let log = Arc::clone(log);
        Arc::new(move |action: &str| log.lock().unwrap().push(format!("{tag}:{action}")))
    }

    #[test]
    fn emit_without_subscribers_is_noop() {
        let bus = EventBus::new();
        assert_eq!(bus.emit("leave:idle", "start"), 0);
    }

    #[test]
    fn emit_fans_out_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.on("enter:a", recorder(&log, "first"));
        bus.on("enter:a", recorder(&log, "second"));

        assert_eq!(bus.emit("enter:a", "go"), 2);
        assert_eq!(*log.lock().unwrap(), vec!["first:go", "second:go"]);
    }

    #[test]
    fn emit_only_reaches_matching_name() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.on("enter:a", recorder(&log, "a"));
        bus.on("enter:b", recorder(&log, "b"));

        bus.emit("enter:b", "go");

        assert_eq!(*log.lock().unwrap(), vec!["b:go"]);
    }

    #[test]
    fn off_removes_only_that_subscription() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let first = bus.on("leave:a", recorder(&log, "first"));
        bus.on("leave:a", recorder(&log, "second"));

        assert!(bus.off("leave:a", first));
        assert_eq!(bus.subscriber_count("leave:a"), 1);

        bus.emit("leave:a", "go");
        assert_eq!(*log.lock().unwrap(), vec!["second:go"]);
    }

    #[test]
    fn off_with_wrong_name_or_unknown_id_is_false() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let id = bus.on("leave:a", recorder(&log, "x"));

        assert!(!bus.off("leave:b", id));
        assert!(!bus.off("leave:a", SubscriptionId::new()));
        assert!(bus.off("leave:a", id));
        assert!(!bus.off("leave:a", id));
        assert_eq!(bus.subscriber_count("leave:a"), 0);
    }

    #[test]
    fn off_callback_matches_by_identity() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let shared = recorder(&log, "shared");
        let lookalike = recorder(&log, "shared");
        let mut bus = EventBus::new();
        bus.on("enter:a", Arc::clone(&shared));
        bus.on("enter:a", Arc::clone(&lookalike));
        bus.on("enter:a", Arc::clone(&shared));

        assert!(!bus.off_callback("enter:b", &shared));
        assert!(bus.off_callback("enter:a", &shared));
        assert_eq!(bus.subscriber_count("enter:a"), 1);
        assert!(!bus.off_callback("enter:a", &shared));

        assert!(bus.off_callback("enter:a", &lookalike));
        assert_eq!(bus.subscriber_count("enter:a"), 0);
    }

    #[test]
    fn same_callback_can_subscribe_twice() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let callback = recorder(&log, "cb");
        let mut bus = EventBus::new();
        bus.on("silent:a", Arc::clone(&callback));
        bus.on("silent:a", callback);

        assert_eq!(bus.emit("silent:a", "noop"), 2);
    }
}
