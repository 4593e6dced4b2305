//! Qbench Command-Line Interface
//!
//! The main entry point for the qbench CLI tool. Runs measurement
//! discrimination benchmarks described in YAML files against configured
//! backends, and turns the collected histograms into probability tables.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{backends, benchmark, resolve, status, tabulate, version};

/// qbench - benchmarking quantum backends via measurement discrimination
#[derive(Parser)]
#[command(name = "qbench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discrimination experiments with the parametrized Fourier family
    DiscFourier {
        #[command(subcommand)]
        stage: FourierStage,
    },

    /// List available backend providers
    Backends,

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum FourierStage {
    /// Run a set of discrimination experiments against a backend
    Benchmark {
        /// Experiment descriptor file (YAML)
        #[arg(short, long)]
        experiment: String,

        /// Backend description file (YAML)
        #[arg(short, long)]
        backend: String,

        /// Output file for the result document
        #[arg(short, long)]
        output: String,
    },

    /// Count the jobs of a submitted experiment set by status
    Status {
        /// Result document holding job references (YAML)
        #[arg(short, long)]
        async_results: String,

        /// Backend description file (YAML)
        #[arg(short, long)]
        backend: String,
    },

    /// Retrieve finished jobs and write the resolved document
    Resolve {
        /// Result document holding job references (YAML)
        #[arg(short, long)]
        async_results: String,

        /// Backend description file (YAML)
        #[arg(short, long)]
        backend: String,

        /// Output file for the resolved document
        #[arg(short, long)]
        output: String,
    },

    /// Compute discrimination probabilities and write them as a table
    Tabulate {
        /// Resolved result document (YAML)
        #[arg(short = 'a', long)]
        results: String,

        /// Output table (.csv, or .yml/.yaml for a YAML row list)
        #[arg(short, long)]
        output: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::DiscFourier { stage } => match stage {
            FourierStage::Benchmark {
                experiment,
                backend,
                output,
            } => benchmark::execute(&experiment, &backend, &output).await,

            FourierStage::Status {
                async_results,
                backend,
            } => status::execute(&async_results, &backend).await,

            FourierStage::Resolve {
                async_results,
                backend,
                output,
            } => resolve::execute(&async_results, &backend, &output).await,

            FourierStage::Tabulate { results, output } => tabulate::execute(&results, &output),
        },

        Commands::Backends => backends::execute(),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
