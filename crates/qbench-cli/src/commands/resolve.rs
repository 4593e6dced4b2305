//! Resolve command implementation.
//!
//! Retrieve the histograms of completed jobs and rewrite the document in
//! its resolved form. Fails without touching the output if any job is
//! still pending or has failed.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qbench_fourier::resolve_results;

use super::common::{create_backend, load_backend_description, load_results, save_yaml};

/// Execute the resolve command.
pub async fn execute(async_results_path: &str, backend_path: &str, output: &str) -> Result<()> {
    let mut result = load_results(async_results_path)?;
    let description = load_backend_description(backend_path)?;
    let backend = create_backend(&description)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Retrieving job results...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let resolution = resolve_results(&mut result, backend.as_ref()).await;
    spinner.finish_and_clear();
    resolution?;

    save_yaml(&result, output)?;

    println!(
        "{} Resolved document written to {}",
        style("✓").green().bold(),
        style(output).green()
    );

    Ok(())
}
