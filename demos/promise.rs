//! Promise Machine
//!
//! This example runs the classic promise machine: `pending` settles into
//! `resolved` or `rejected`, both final.
//!
//! Key concepts:
//! - Declarative JSON config validated up front
//! - Logging as an explicitly registered observer
//! - Final states stop the interpreter
//!
//! Run with: RUST_LOG=info cargo run --example promise

use fsmlite::{interpret, observers, Machine, Snapshot};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const PROMISE: &str = r#"{
    "id": "promise",
    "initial": "pending",
    "states": {
        "pending": {
            "on": {
                "RESOLVE": { "target": "resolved" },
                "REJECT": { "target": "rejected" }
            }
        },
        "resolved": { "type": "final" },
        "rejected": { "type": "final" }
    }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Promise Machine ===\n");

    let machine: Arc<Machine<String, String>> = Arc::new(Machine::from_json(PROMISE)?);

    let mut service = interpret(Arc::clone(&machine));
    service
        .on_transition(|state: &Snapshot<String, String>| println!("{}", state.value))
        .on_transition(observers::log_transitions::<String, String>(machine.id()))
        .start();
    // => pending

    service.send("RESOLVE");
    // => resolved

    // already settled, nothing happens
    service.send("REJECT");

    println!("\nStatus: {:?}", service.status());
    println!("Path:   {:?}", service.history().get_path());

    println!("\n=== Example Complete ===");
    Ok(())
}
