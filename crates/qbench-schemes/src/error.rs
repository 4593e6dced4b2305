//! Error types for discrimination schemes.

use qbench_hal::HalError;
use qbench_ir::{ComponentRole, IrError};
use thiserror::Error;

/// Errors that can occur when assembling or interpreting discrimination
/// experiments.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemeError {
    /// Target and ancilla must name two distinct qubits.
    #[error("Invalid qubit pair: target {target} and ancilla {ancilla} must differ")]
    InvalidQubitPair {
        /// Target qubit index.
        target: u32,
        /// Ancilla qubit index.
        ancilla: u32,
    },

    /// A component was passed in a slot meant for a different role.
    #[error("Component role mismatch: expected {expected}, got {got}")]
    RoleMismatch {
        /// Role the slot requires.
        expected: ComponentRole,
        /// Role the component carries.
        got: ComponentRole,
    },

    /// A histogram key is not a two-character bitstring.
    #[error("Malformed bitstring key: {key:?}")]
    MalformedBitstring {
        /// The offending key.
        key: String,
    },

    /// The denominator of the discrimination probability is zero.
    #[error("Discrimination probability is undefined: total outcome weight is zero")]
    UndefinedProbability,

    /// Readout calibration produced a non-invertible assignment matrix.
    #[error("Calibration assignment matrix is singular")]
    SingularCalibration,

    /// A backend returned the wrong number of histograms for a batch.
    #[error("Expected {expected} histograms, got {got}")]
    HistogramCountMismatch {
        /// Number of circuits submitted.
        expected: usize,
        /// Number of histograms returned.
        got: usize,
    },

    /// Circuit construction failed.
    #[error("Circuit construction error: {0}")]
    Ir(#[from] IrError),

    /// Backend interaction failed.
    #[error("Backend error: {0}")]
    Hal(#[from] HalError),
}

/// Result type for scheme operations.
pub type SchemeResult<T> = Result<T, SchemeError>;
