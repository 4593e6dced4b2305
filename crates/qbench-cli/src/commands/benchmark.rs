//! Benchmark command implementation.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qbench_fourier::run_experiment;

use super::common::{create_backend, load_backend_description, load_experiment, save_yaml};

/// Execute the benchmark command.
pub async fn execute(experiment_path: &str, backend_path: &str, output: &str) -> Result<()> {
    let experiments = load_experiment(experiment_path)?;
    let description = load_backend_description(backend_path)?;

    println!(
        "{} Benchmarking {} pair(s) x {} angle(s) with {} on {} ({} shots per circuit)",
        style("→").cyan().bold(),
        experiments.qubits.len(),
        experiments.angles.num_steps,
        style(experiments.method.to_string()).yellow(),
        style(&description.name).yellow(),
        experiments.num_shots
    );

    let backend = create_backend(&description)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(if description.asynchronous {
        format!("Submitting {} circuits...", experiments.num_circuits())
    } else {
        format!("Running {} circuits...", experiments.num_circuits())
    });
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = run_experiment(backend.as_ref(), &experiments, &description).await?;
    spinner.finish_and_clear();

    save_yaml(&result, output)?;

    if let Some(records) = result.batch_records() {
        println!(
            "{} Submitted {} job(s); resolve them later with `qbench disc-fourier resolve`",
            style("✓").green().bold(),
            records.len()
        );
    } else {
        println!(
            "{} Collected histograms for every circuit",
            style("✓").green().bold()
        );
    }
    println!("  Result document: {}", style(output).green());

    Ok(())
}
