//! Deferred Transitions
//!
//! This example demonstrates holding a machine between states while
//! asynchronous work completes.
//!
//! Key concepts:
//! - `fire(action, true)` stops after the leave notification
//! - Actions fired while pending are dropped (observable via `on_dropped`)
//! - `sync()` runs the enter notification and commits the move
//!
//! Run with: cargo run --example async_resume

use std::time::Duration;
use transit::builder::MachineBuilder;

#[tokio::main]
async fn main() {
    println!("=== Deferred Transition Example ===\n");

    let mut page = MachineBuilder::new()
        .initial("home")
        .transit("navigate", Some("home"), "settings")
        .transit("back", Some("settings"), "home")
        .on("leave:home", |action| println!("  fade out home ({action})"))
        .on("enter:settings", |action| println!("  settings visible ({action})"))
        .on_dropped(|action| println!("  dropped '{action}': transition in flight"))
        .build()
        .unwrap();

    page.fire("navigate", true);
    println!("Pending: {:?} -> {:?}", page.state(), page.pending_target());

    page.fire("back", false);

    // Stand-in for an animation finishing.
    tokio::time::sleep(Duration::from_millis(50)).await;

    page.sync();
    println!("Settled in: {}", page.state());

    println!("\n=== Example Complete ===");
}
