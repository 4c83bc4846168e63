//! Door State Machine
//!
//! This example demonstrates synchronous transitions and silent events.
//!
//! Key concepts:
//! - Declaring transitions with the `transits!` macro
//! - Observing leave/enter notifications
//! - Silent events for actions that do nothing from the current state
//!
//! Run with: cargo run --example door

use transit::builder::MachineBuilder;
use transit::transits;

fn main() {
    println!("=== Door State Machine ===\n");

    let mut door = MachineBuilder::new()
        .initial("closed")
        .transits(transits! {
            "open": "closed" => "opened",
            "close": "opened" => "closed",
            "lock": "closed" => "locked",
            "unlock": "locked" => "closed",
        })
        .on("leave:closed", |action| println!("  leaving closed ({action})"))
        .on("enter:opened", |action| println!("  door is open ({action})"))
        .on("enter:locked", |action| println!("  door is locked ({action})"))
        .on("silent:locked", |action| println!("  '{action}' does nothing while locked"))
        .build()
        .unwrap();

    println!("Initial state: {}", door.state());
    println!("Available actions: {:?}\n", door.actions());

    for action in ["lock", "open", "unlock", "open"] {
        println!("fire({action})");
        door.fire(action, false);
        println!("  -> {}\n", door.state());
    }

    println!("=== Example Complete ===");
}
