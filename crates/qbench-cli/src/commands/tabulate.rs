//! Tabulate command implementation.
//!
//! Turn a resolved result document into a probability table. The output
//! format follows the file extension: `.yml`/`.yaml` produce a YAML row
//! list, anything else CSV with header
//! `target,ancilla,phi,ideal_prob,disc_prob[,mit_disc_prob]`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qbench_fourier::{TabulatedRow, tabulate_results};

use super::common::load_results;

/// Execute the tabulate command.
pub fn execute(results_path: &str, output: &str) -> Result<()> {
    let result = load_results(results_path)?;
    let rows = tabulate_results(&result)?;

    let extension = Path::new(output)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    let rendered = match extension.to_lowercase().as_str() {
        "yml" | "yaml" => serde_yaml_ng::to_string(&rows).context("Failed to serialize table")?,
        _ => render_csv(&rows),
    };

    fs::write(output, rendered).with_context(|| format!("Failed to write file: {output}"))?;

    println!(
        "{} Tabulated {} row(s) to {}",
        style("✓").green().bold(),
        rows.len(),
        style(output).green()
    );

    Ok(())
}

/// Render rows as CSV. The mitigated column appears when at least one row
/// carries a mitigated probability; rows without one leave the field empty.
pub fn render_csv(rows: &[TabulatedRow]) -> String {
    let mitigated = rows.iter().any(|row| row.mit_disc_prob.is_some());

    let mut out = String::from(if mitigated {
        "target,ancilla,phi,ideal_prob,disc_prob,mit_disc_prob\n"
    } else {
        "target,ancilla,phi,ideal_prob,disc_prob\n"
    });

    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{}",
            row.target, row.ancilla, row.phi, row.ideal_prob, row.disc_prob
        ));
        if mitigated {
            match row.mit_disc_prob {
                Some(value) => out.push_str(&format!(",{value}")),
                None => out.push(','),
            }
        }
        out.push('\n');
    }

    out
}
