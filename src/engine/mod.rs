//! The running machine.
//!
//! A transition has two halves. `fire` always runs the leave half; the
//! enter half either follows immediately or is parked until `sync`. Only
//! one transition can be in flight; actions fired meanwhile are dropped.
//!
//! ```text
//!            fire (no match)
//!           ┌──────────┐
//!           ▼          │
//!       ┌─────────┐  fire(deferred)  ┌─────────┐
//!  ───► │ Settled │ ───────────────► │ Pending │ ◄─┐ fire (dropped)
//!       └─────────┘ ◄─────────────── └─────────┘ ──┘
//!                        sync
//! ```

mod machine;

pub use machine::{DroppedHook, FireOutcome, Machine, Status};
