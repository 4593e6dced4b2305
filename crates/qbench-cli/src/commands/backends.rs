//! Backends command implementation.

use anyhow::Result;
use console::style;

use super::common::backend_registry;

/// Execute the backends command.
pub fn execute() -> Result<()> {
    let registry = backend_registry();

    println!("{} Available providers:\n", style("qbench").cyan().bold());

    for provider in registry.available_providers() {
        println!("  {} {}", style("●").green(), style(&provider).bold());
    }

    println!();
    println!("Reference a provider from a backend description file, e.g.");
    println!("  provider: sim");
    println!("  name: simulator");

    Ok(())
}
