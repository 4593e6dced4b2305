//! Qbench Local Statevector Simulator
//!
//! This crate provides a local quantum simulator for testing, development,
//! and small-scale benchmark runs. It uses statevector simulation, which
//! provides exact results but is limited to ~20-25 qubits.
//!
//! # Features
//!
//! - **Exact Simulation**: Full statevector representation
//! - **All Standard Gates**: Supports every gate from `qbench-ir`
//! - **Measurement Sampling**: Probabilistic measurement with configurable shots
//! - **Readout Noise Injection**: Optional per-shot bit flips with calibrated
//!   rates, for exercising error mitigation
//! - **Failure Injection**: Deliberate submission failures, for exercising
//!   caller recovery paths
//!
//! # Example
//!
//! ```ignore
//! use qbench_adapter_sim::SimulatorBackend;
//! use qbench_hal::Backend;
//! use qbench_ir::{Circuit, QubitId};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new();
//!
//!     let mut circuit = Circuit::new("bell", 2, 2);
//!     circuit.h(QubitId(0))?;
//!     circuit.cx(QubitId(0), QubitId(1))?;
//!     circuit.measure_all()?;
//!
//!     let histograms = backend.run(&[circuit], 1000).await?;
//!
//!     // Expect ~50% |00⟩ and ~50% |11⟩
//!     println!("Results: {:?}", histograms[0]);
//!
//!     Ok(())
//! }
//! ```

mod simulator;
pub mod statevector;

pub use simulator::SimulatorBackend;
pub use statevector::Statevector;
