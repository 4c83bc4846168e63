//! Bookkeeping behind every machine.
//!
//! - State names interned to stable indices via [`StateRegistry`]
//! - The `(action, previous) -> next` lookup in [`TransitionTable`]
//! - Typed notification keys via [`EventKey`] and [`Phase`]
//!
//! Nothing here emits events or holds a current state; that is the
//! engine's job.

mod event;
mod state;
mod table;

pub use event::{EventKey, Phase};
pub use state::{StateId, StateRegistry, NONE};
pub use table::TransitionTable;
