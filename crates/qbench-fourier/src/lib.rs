//! Qbench Fourier Experiments
//!
//! This crate orchestrates complete discrimination benchmarks for the
//! Fourier family of measurements: a parametrized pair of von Neumann
//! measurements whose optimal discrimination probability is known in closed
//! form, so a device's measured success ratio can be compared against the
//! ideal bound angle by angle.
//!
//! # Overview
//!
//! - [`FourierExperimentSet`] describes a benchmark: qubit pairs, angle
//!   grid, gateset, estimation method and shot count, parsed from YAML
//! - [`FourierComponents`] builds the circuit fragments for one angle in
//!   the generic, Rigetti or IBM Q gateset
//! - [`run_experiment`] expands, batches and executes the set on any
//!   [`Backend`](qbench_hal::Backend), producing a
//!   [`FourierDiscriminationResult`] document — measured histograms for
//!   synchronous backends, job references for asynchronous ones
//! - [`fetch_statuses`] and [`resolve_results`] drive the deferred half of
//!   the asynchronous flow from the persisted document
//! - [`tabulate_results`] reduces a resolved document to one row per trial,
//!   next to the ideal bound [`discrimination_probability_upper_bound`]
//!
//! # Example: Benchmarking on the Simulator
//!
//! ```ignore
//! use qbench_adapter_sim::SimulatorBackend;
//! use qbench_fourier::{run_experiment, tabulate_results, FourierExperimentSet};
//! use qbench_hal::BackendDescription;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let experiments: FourierExperimentSet = serde_yaml_ng::from_str(
//!         r#"
//!         type: discrimination-fourier
//!         qubits:
//!           - target: 0
//!             ancilla: 1
//!         angles:
//!           start: 0
//!           stop: 6.2831853
//!           num_steps: 7
//!         method: direct_sum
//!         num_shots: 10000
//!         "#,
//!     )?;
//!
//!     let backend = SimulatorBackend::new();
//!     let description = BackendDescription::new("sim", "simulator");
//!
//!     let result = run_experiment(&backend, &experiments, &description).await?;
//!     for row in tabulate_results(&result)? {
//!         println!(
//!             "phi = {:.3}: measured {:.4}, ideal {:.4}",
//!             row.phi, row.disc_prob, row.ideal_prob
//!         );
//!     }
//!     Ok(())
//! }
//! ```
//!
//! For an asynchronous backend the same `run_experiment` call returns a
//! document of job references instead; serialize it, and later feed the
//! parsed document through [`resolve_results`] before tabulating.

pub mod components;
pub mod document;
pub mod error;
pub mod experiment;
pub mod probability;
pub mod runner;
pub mod tabulate;

pub use components::{FourierComponents, Gateset};
pub use document::{
    BatchRecord, CircuitKey, FourierDiscriminationResult, MitigationInfo, ResultData,
    ResultForCircuit, ResultMetadata, SingleResult,
};
pub use error::{FourierError, FourierResult};
pub use experiment::{AnglesRange, ExperimentType, FourierExperimentSet, Method, QubitPair};
pub use probability::discrimination_probability_upper_bound;
pub use runner::{fetch_statuses, resolve_results, run_experiment};
pub use tabulate::{TabulatedRow, tabulate_results};
