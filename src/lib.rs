//! Transit: a finite state machine with deferrable transitions
//!
//! A machine holds a set of named states and a table of
//! `(action, previous state) -> next state` rules. Firing an action runs
//! the transition in two halves, announcing each on an event channel:
//!
//! - `leave:<state>` as the machine leaves its current state
//! - `enter:<state>` once it has arrived
//! - `silent:<state>` when the action has no effect from the current state
//!
//! A transition can be deferred: the machine stops after the leave half and
//! refuses every further action until [`Machine::sync`] completes it. This
//! lets a caller hold the machine between states while something external
//! (an animation, a network round-trip) finishes.
//!
//! # Core Concepts
//!
//! - **States**: interned names with stable indices, see [`StateRegistry`](crate::core::StateRegistry)
//! - **Transitions**: `(action, prev) -> next` rows in [`TransitionTable`](crate::core::TransitionTable)
//! - **Channel**: observers subscribe through [`channel::EventChannel`]
//! - **Machine**: the fire/sync protocol in [`Machine`]
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use transit::builder::MachineBuilder;
//! use transit::transits;
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&log);
//!
//! let mut machine = MachineBuilder::new()
//!     .initial("idle")
//!     .transits(transits! {
//!         "start": "idle" => "running",
//!         "stop": "running" => "idle",
//!     })
//!     .on("leave:running", move |action| {
//!         sink.lock().unwrap().push(format!("leaving on {action}"));
//!     })
//!     .build()
//!     .unwrap();
//!
//! machine.fire("start", false);
//! machine.fire("stop", true);
//! assert_eq!(machine.state(), "running");
//! assert!(!machine.is_sync());
//!
//! machine.sync();
//! assert_eq!(machine.state(), "idle");
//! assert_eq!(*log.lock().unwrap(), vec!["leaving on stop"]);
//! ```

pub mod builder;
pub mod channel;
pub mod config;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use channel::{EventBus, EventChannel, SubscriptionId};
pub use config::{MachineConfig, Transit};
pub use crate::core::{Phase, StateId, NONE};
pub use engine::{FireOutcome, Machine, Status};
