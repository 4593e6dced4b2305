//! Qbench Circuit Representation
//!
//! This crate provides the core data structures for representing the quantum
//! circuits run by Qbench benchmarks. It is the foundation the scheme and
//! experiment crates build on.
//!
//! # Overview
//!
//! Circuits are flat instruction sequences over fixed-size quantum and
//! classical registers. The high-level [`Circuit`] API provides a convenient
//! builder pattern; [`Component`] captures reusable gate-only fragments on
//! canonical qubits that experiment code retargets onto physical qubit pairs.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing
//!   quantum and classical registers
//! - **Gates**: [`StandardGate`] for built-in gates (H, X, CX, etc.) with
//!   concrete rotation angles
//! - **Instructions**: [`Instruction`] combining gates, measurements, and
//!   barriers with their operands
//! - **Circuit**: [`Circuit`] high-level builder API
//! - **Components**: [`Component`] and [`ComponentRole`] for retargetable
//!   circuit fragments
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qbench_ir::{Circuit, QubitId};
//!
//! // Create a new circuit with 2 qubits and 2 classical bits
//! let mut circuit = Circuit::new("bell_state", 2, 2);
//!
//! // Build the Bell state: |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! // Add measurement
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.measurements().count(), 2);
//! ```
//!
//! # Example: Retargeting a Component
//!
//! ```rust
//! use qbench_ir::{Component, ComponentRole, Instruction, QubitId, StandardGate};
//!
//! // A single-qubit fragment defined on canonical qubit 0
//! let u_dag = Component::new(
//!     ComponentRole::UDag,
//!     [Instruction::single_qubit_gate(StandardGate::H, QubitId(0))],
//! )
//! .unwrap();
//!
//! // Rewrite it onto physical qubit 7
//! let instructions = u_dag.retarget(&[QubitId(7)]).unwrap();
//! assert_eq!(instructions[0].qubits, vec![QubitId(7)]);
//! ```

pub mod circuit;
pub mod component;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use component::{Component, ComponentRole};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
