//! Qbench Discrimination Schemes
//!
//! This crate implements the two schemes for certifying how well a device
//! discriminates between a pair of von Neumann measurements: the
//! postselection scheme and the direct-sum scheme. Both take the same
//! building blocks, retargetable [`Component`](qbench_ir::Component)
//! fragments, assemble them into measurement circuits for a concrete
//! (target, ancilla) qubit pair, and interpret the returned histograms as a
//! discrimination probability.
//!
//! # Overview
//!
//! - **Assembly**: [`assemble_postselection_circuits`] builds the four
//!   postselection circuits, [`assemble_direct_sum_circuits`] the two
//!   direct-sum circuits
//! - **Interpretation**: `compute_probabilities_from_*_measurements` turn
//!   histograms into a probability estimate;
//!   `compute_probabilities_from_*_distributions` accept quasi-probability
//!   weights, e.g. after readout mitigation
//! - **Mitigation**: [`mitigate_counts`] corrects a histogram for calibrated
//!   readout errors via assignment-matrix inversion
//! - **End to end**: [`benchmark_using_postselection`] and
//!   [`benchmark_using_direct_sum`] run assembly, execution, and
//!   interpretation against any [`Backend`](qbench_hal::Backend)
//!
//! Histograms follow the bit convention of `qbench-hal`: character 0 of a
//! key is the target outcome, character 1 the ancilla outcome.
//!
//! # Example
//!
//! ```rust
//! use qbench_hal::Histogram;
//! use qbench_schemes::compute_probabilities_from_direct_sum_measurements;
//!
//! let id: Histogram = [("01", 850u64), ("00", 150)].into_iter().collect();
//! let u: Histogram = [("00", 860u64), ("01", 140)].into_iter().collect();
//!
//! let probability = compute_probabilities_from_direct_sum_measurements(&id, &u).unwrap();
//! assert!((probability - 0.855).abs() < 1e-12);
//! ```

mod assembly;

pub mod direct_sum;
pub mod distributions;
pub mod error;
pub mod mitigation;
pub mod postselection;
pub mod roles;

pub use direct_sum::{
    DirectSumCircuits, assemble_direct_sum_circuits, benchmark_using_direct_sum,
    compute_probabilities_from_direct_sum_distributions,
    compute_probabilities_from_direct_sum_measurements,
};
pub use distributions::QuasiDistribution;
pub use error::{SchemeError, SchemeResult};
pub use mitigation::mitigate_counts;
pub use postselection::{
    PostselectionCircuits, assemble_postselection_circuits, benchmark_using_postselection,
    compute_probabilities_from_postselection_distributions,
    compute_probabilities_from_postselection_measurements,
};
pub use roles::CircuitRole;
