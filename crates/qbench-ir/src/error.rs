//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index exceeds the circuit size.
    #[error("qubit {qubit} out of range for circuit with {num_qubits} qubit(s)")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits in the circuit.
        num_qubits: u32,
    },

    /// Classical bit index exceeds the circuit size.
    #[error("classical bit {clbit} out of range for circuit with {num_clbits} bit(s)")]
    ClbitOutOfRange {
        /// The offending classical bit index.
        clbit: u32,
        /// Number of classical bits in the circuit.
        num_clbits: u32,
    },

    /// Duplicate qubit passed to a multi-qubit gate.
    #[error("duplicate qubit {qubit} in '{gate_name}'")]
    DuplicateQubit {
        /// The duplicate qubit index.
        qubit: u32,
        /// Name of the gate.
        gate_name: &'static str,
    },

    /// Gate applied with the wrong number of qubits.
    #[error("gate '{gate_name}' requires {expected} qubit(s), got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: &'static str,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// measure_all with mismatched qubit/clbit counts.
    #[error("measure_all: qubit count ({qubits}) does not match clbit count ({clbits})")]
    MeasureCountMismatch {
        /// Number of qubits.
        qubits: usize,
        /// Number of classical bits.
        clbits: usize,
    },

    /// Component instruction touches a qubit outside its canonical range.
    #[error("{role} component acts on {arity} qubit(s), instruction uses canonical qubit {qubit}")]
    ComponentQubitOutOfRange {
        /// Role name of the component.
        role: &'static str,
        /// Declared arity of the component.
        arity: u32,
        /// The offending canonical qubit index.
        qubit: u32,
    },

    /// Component holds a non-gate instruction.
    #[error("{role} component may contain only gate instructions, found '{found}'")]
    NonGateInComponent {
        /// Role name of the component.
        role: &'static str,
        /// Name of the offending instruction.
        found: &'static str,
    },

    /// Retarget called with the wrong number of physical qubits.
    #[error("retargeting a {arity}-qubit component requires {arity} physical qubit(s), got {got}")]
    RetargetCountMismatch {
        /// Declared arity of the component.
        arity: u32,
        /// Number of physical qubits provided.
        got: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
