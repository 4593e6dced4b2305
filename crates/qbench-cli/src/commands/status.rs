//! Status command implementation.
//!
//! Count the jobs referenced by a submitted experiment document by status.

use anyhow::Result;
use console::style;

use qbench_fourier::fetch_statuses;

use super::common::{create_backend, load_backend_description, load_results};

/// Execute the status command.
pub async fn execute(async_results_path: &str, backend_path: &str) -> Result<()> {
    let result = load_results(async_results_path)?;
    let description = load_backend_description(backend_path)?;
    let backend = create_backend(&description)?;

    let counts = fetch_statuses(backend.as_ref(), &result).await?;
    let total: usize = counts.values().sum();

    println!("{} {} job(s):\n", style("→").cyan().bold(), total);

    for (status, count) in &counts {
        let status_styled = match status.as_str() {
            "Completed" => style(status.as_str()).green(),
            "Failed" | "Cancelled" => style(status.as_str()).red(),
            "Queued" | "Running" => style(status.as_str()).yellow(),
            _ => style(status.as_str()).cyan(),
        };
        println!("  {:<12} {}", status_styled, count);
    }

    Ok(())
}
