//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - measurement discrimination benchmarks for quantum backends",
        style("qbench").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qbench-ir       Circuit intermediate representation");
    println!("  qbench-hal      Backend abstraction layer");
    println!("  qbench-schemes  Discrimination schemes and mitigation");
    println!("  qbench-fourier  Fourier-family experiment pipeline");
    println!("  qbench-cli      Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/hiq-lab/qbench").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
