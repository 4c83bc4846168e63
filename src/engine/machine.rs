//! The machine: current state plus the two-phase fire/sync protocol.

use crate::channel::{Callback, EventBus, EventChannel, SubscriptionId};
use crate::config::MachineConfig;
use crate::core::{EventKey, Phase, StateId, StateRegistry, TransitionTable, NONE};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Hook invoked with an action that `fire` discarded because a transition
/// was still pending.
pub type DroppedHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Whether the machine can accept the next action.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    /// No transition in progress.
    Settled,
    /// A transition has left its origin and waits for [`Machine::sync`].
    Pending,
}

/// What a call to [`Machine::fire`] did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FireOutcome {
    /// Leave and enter both ran; the machine is settled in `to`.
    Transitioned { from: StateId, to: StateId },
    /// Leave ran; enter is parked until [`Machine::sync`].
    Suspended { from: StateId, to: StateId },
    /// No transition for this action from the current state.
    Silent,
    /// Discarded because another transition was pending.
    Dropped,
}

/// The parked enter half of a deferred transition.
#[derive(Clone, Debug)]
struct PendingTransit {
    action: String,
    from: StateId,
    to: StateId,
}

/// Finite state machine with deferrable transitions.
///
/// `fire` looks up `(action, current)` in the transition table. With no
/// match it emits `silent:<state>`. Otherwise it emits `leave:<from>`,
/// then either completes at once (emits `enter:<to>` and moves) or, when
/// deferred, parks the enter half until `sync` is called. While parked,
/// every further `fire` is dropped.
///
/// # Example
///
/// ```rust
/// use transit::{Machine, Status};
///
/// let mut machine = Machine::new("idle");
/// machine.add("start", Some("idle"), "running");
/// machine.add("stop", Some("running"), "idle");
///
/// machine.fire("start", false);
/// assert_eq!(machine.state(), "running");
///
/// machine.fire("stop", true);
/// assert_eq!(machine.state(), "running");
/// assert_eq!(machine.status(), Status::Pending);
///
/// assert!(machine.sync());
/// assert_eq!(machine.state(), "idle");
/// assert!(machine.is_sync());
/// ```
pub struct Machine<C: EventChannel = EventBus> {
    states: StateRegistry,
    table: TransitionTable,
    channel: C,
    current: StateId,
    pending: Option<PendingTransit>,
    on_dropped: Option<DroppedHook>,
}

impl Machine<EventBus> {
    /// Create a machine in `initial` with an empty [`EventBus`].
    pub fn new(initial: &str) -> Self {
        Self::with_channel(initial, EventBus::new())
    }

    /// Build a machine from factory input: register every transit, then
    /// subscribe every event binding.
    ///
    /// Nothing is rejected here; use [`MachineConfig::validate`] or the
    /// builder for strict checking.
    pub fn create(config: MachineConfig) -> Self {
        Self::create_with_channel(config, EventBus::new())
    }
}

impl Default for Machine<EventBus> {
    fn default() -> Self {
        Self::new(NONE)
    }
}

impl<C: EventChannel> Machine<C> {
    /// Create a machine in `initial` that publishes through `channel`.
    ///
    /// An empty `initial` starts the machine in `"none"`.
    pub fn with_channel(initial: &str, channel: C) -> Self {
        let mut states = StateRegistry::new();
        let current = if initial.is_empty() {
            StateId::NONE
        } else {
            states.resolve(initial)
        };
        Self {
            states,
            table: TransitionTable::new(),
            channel,
            current,
            pending: None,
            on_dropped: None,
        }
    }

    /// [`Machine::create`] with a caller-supplied channel.
    pub fn create_with_channel(config: MachineConfig, channel: C) -> Self {
        let initial = config.initial.as_deref().unwrap_or(NONE);
        let mut machine = Self::with_channel(initial, channel);

        for transit in &config.transits {
            machine.add(&transit.action, transit.prev.as_deref(), &transit.next);
        }
        for binding in config.events {
            machine.subscribe(&binding.name, binding.callback);
        }
        machine
    }

    /// Register `action: prev -> next`. A missing or empty `prev` means
    /// `"none"`; re-adding the same `(action, prev)` overwrites.
    pub fn add(&mut self, action: &str, prev: Option<&str>, next: &str) {
        self.table.add(&mut self.states, action, prev, next);
    }

    /// Subscribe a closure to an event name such as `"enter:running"`.
    ///
    /// Callbacks run inside `fire`/`sync` while the machine is mutably
    /// borrowed, so they cannot fire a follow-up action on it. Nothing is
    /// queued behind a transition either: a callback that locks a shared
    /// `Arc<Mutex<Machine>>` to call `fire` deadlocks. Record the follow-up
    /// instead and fire it after the current call returns.
    pub fn on<F>(&mut self, name: &str, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.subscribe(name, Arc::new(callback))
    }

    /// Subscribe an already shared callback.
    pub fn subscribe(&mut self, name: &str, callback: Callback) -> SubscriptionId {
        self.channel.on(name, callback)
    }

    /// Unsubscribe. Returns whether the subscription existed.
    pub fn off(&mut self, name: &str, id: SubscriptionId) -> bool {
        self.channel.off(name, id)
    }

    /// Unsubscribe a shared callback passed to [`Machine::subscribe`].
    pub fn off_callback(&mut self, name: &str, callback: &Callback) -> bool {
        self.channel.off_callback(name, callback)
    }

    /// Observe actions dropped while a transition is pending.
    ///
    /// Dropping stays silent on the channel either way; this only adds a
    /// side door for callers who want to know.
    pub fn on_dropped<F>(&mut self, hook: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_dropped = Some(Arc::new(hook));
    }

    pub(crate) fn set_dropped_hook(&mut self, hook: Option<DroppedHook>) {
        self.on_dropped = hook;
    }

    /// Apply `action` to the current state.
    ///
    /// With `deferred` set, the machine stops after the leave notification
    /// and stays [`Status::Pending`] until [`Machine::sync`].
    pub fn fire(&mut self, action: &str, deferred: bool) -> FireOutcome {
        if let Some(pending) = &self.pending {
            debug!(
                action,
                pending = %pending.action,
                "action dropped while transition pending"
            );
            if let Some(hook) = &self.on_dropped {
                hook(action);
            }
            return FireOutcome::Dropped;
        }

        let from = self.current;
        let Some(to) = self.table.lookup(action, from) else {
            trace!(action, state = self.state(), "no transition, emitting silent");
            self.emit(EventKey::new(Phase::Silent, from), action);
            return FireOutcome::Silent;
        };

        self.emit(EventKey::new(Phase::Leave, from), action);
        self.pending = Some(PendingTransit {
            action: action.to_string(),
            from,
            to,
        });

        if deferred {
            debug!(
                action,
                from = self.state(),
                to = self.states.name_of(to).unwrap_or_default(),
                "transition suspended"
            );
            return FireOutcome::Suspended { from, to };
        }

        self.commit();
        FireOutcome::Transitioned { from, to }
    }

    /// Complete a pending transition. No-op (returns `false`) when settled.
    pub fn sync(&mut self) -> bool {
        self.commit().is_some()
    }

    fn commit(&mut self) -> Option<PendingTransit> {
        let pending = self.pending.take()?;

        self.emit(EventKey::new(Phase::Enter, pending.to), &pending.action);
        self.current = pending.to;

        debug!(
            action = %pending.action,
            from = self.states.name_of(pending.from).unwrap_or_default(),
            to = self.state(),
            "transition committed"
        );
        Some(pending)
    }

    fn emit(&self, key: EventKey, action: &str) -> usize {
        match key.render(&self.states) {
            Some(name) => self.channel.emit(&name, action),
            None => 0,
        }
    }

    /// Name of the current state.
    pub fn state(&self) -> &str {
        self.states.name_of(self.current).unwrap_or(NONE)
    }

    /// Name of any state by index; unknown indices yield `None`.
    pub fn state_name(&self, id: StateId) -> Option<&str> {
        self.states.name_of(id)
    }

    /// Index of the current state.
    pub fn current(&self) -> StateId {
        self.current
    }

    pub fn status(&self) -> Status {
        if self.pending.is_some() {
            Status::Pending
        } else {
            Status::Settled
        }
    }

    /// True when no transition is pending and `fire` will be honoured.
    pub fn is_sync(&self) -> bool {
        self.pending.is_none()
    }

    /// Target of the pending transition, if any.
    pub fn pending_target(&self) -> Option<&str> {
        self.pending
            .as_ref()
            .and_then(|pending| self.states.name_of(pending.to))
    }

    /// Whether `action` has a transition from the current state.
    pub fn can(&self, action: &str) -> bool {
        self.table.lookup(action, self.current).is_some()
    }

    /// Actions with a transition from the current state, sorted.
    pub fn actions(&self) -> Vec<&str> {
        let mut actions: Vec<&str> = self.table.actions_from(self.current).collect();
        actions.sort_unstable();
        actions
    }

    pub fn states(&self) -> &StateRegistry {
        &self.states
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }
}

impl<C: EventChannel> fmt::Debug for Machine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("state", &self.state())
            .field("status", &self.status())
            .field("pending", &self.pending)
            .field("states", &self.states.len())
            .field("transitions", &self.table.len())
            .finish()
    }
}
