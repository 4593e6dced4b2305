//! Qbench Backend Abstraction Layer
//!
//! This crate provides a unified interface for executing benchmark circuits,
//! enabling Qbench to work seamlessly with simulators and remote hardware.
//!
//! # Overview
//!
//! The HAL abstracts away backend-specific details, providing:
//! - A common [`Backend`] trait for batch submission and job management
//! - [`BackendDescription`] for the declarative backend blocks in experiment
//!   files, with out-of-band credential resolution
//! - [`BackendRegistry`] mapping provider keys to backend factories
//! - Unified result handling via [`Histogram`]
//! - [`batch_circuits_with_keys`] for splitting workloads to a backend's
//!   batch limit without losing track of which circuit is which
//!
//! # Example: Running Circuits
//!
//! ```ignore
//! use qbench_hal::Backend;
//! use qbench_adapter_sim::SimulatorBackend;
//! use qbench_ir::{Circuit, QubitId};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Create a Bell state circuit
//!     let mut circuit = Circuit::new("bell", 2, 2);
//!     circuit.h(QubitId(0))?;
//!     circuit.cx(QubitId(0), QubitId(1))?;
//!     circuit.measure_all()?;
//!
//!     // Initialize the simulator backend
//!     let backend = SimulatorBackend::new();
//!
//!     // Submit the batch
//!     let job_id = backend.submit(&[circuit], 1000).await?;
//!     println!("Job submitted: {}", job_id);
//!
//!     // Wait for results, one histogram per circuit
//!     let histograms = backend.wait(&job_id).await?;
//!     println!("Results: {:?}", histograms[0]);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Implementing a Custom Backend
//!
//! ```ignore
//! use qbench_hal::{Backend, Histogram, HalResult, JobId, JobStatus};
//! use qbench_ir::Circuit;
//! use async_trait::async_trait;
//!
//! struct MyBackend;
//!
//! #[async_trait]
//! impl Backend for MyBackend {
//!     fn name(&self) -> &str { "my_backend" }
//!
//!     async fn submit(&self, circuits: &[Circuit], shots: u32) -> HalResult<JobId> {
//!         // Submit the whole batch to hardware
//!         # todo!()
//!     }
//!
//!     async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
//!         // Query job status
//!         # todo!()
//!     }
//!
//!     async fn retrieve(&self, job_id: &JobId) -> HalResult<Vec<Histogram>> {
//!         // Retrieve histograms in submission order
//!         # todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod batching;
pub mod descriptor;
pub mod error;
pub mod job;
pub mod registry;
pub mod result;

pub use backend::{Backend, BackendConfig, BackendFactory, ReadoutError};
pub use batching::{Batch, batch_circuits_with_keys};
pub use descriptor::BackendDescription;
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use registry::BackendRegistry;
pub use result::Histogram;
