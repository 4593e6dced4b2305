//! Readout error mitigation via assignment-matrix inversion.
//!
//! A qubit's readout is modeled by a 2x2 assignment matrix `A` with
//! `A[i][j] = P(measured i | prepared j)`. The joint correction for a
//! (target, ancilla) pair is the Kronecker product of the inverted
//! single-qubit matrices, applied to the observed outcome weights.
//!
//! Corrected weights are quasi-probabilities: they may fall outside `[0, 1]`
//! and are reported as-is, without clamping.

use ndarray::linalg::kron;
use ndarray::{Array1, Array2, array};

use qbench_hal::{Histogram, ReadoutError};

use crate::distributions::{QuasiDistribution, outcome_weights};
use crate::error::{SchemeError, SchemeResult};

fn assignment_matrix(error: &ReadoutError) -> Array2<f64> {
    array![
        [1.0 - error.prob_meas1_prep0, error.prob_meas0_prep1],
        [error.prob_meas1_prep0, 1.0 - error.prob_meas0_prep1],
    ]
}

fn inverted(matrix: &Array2<f64>) -> SchemeResult<Array2<f64>> {
    let det = matrix[(0, 0)] * matrix[(1, 1)] - matrix[(0, 1)] * matrix[(1, 0)];
    if det == 0.0 {
        return Err(SchemeError::SingularCalibration);
    }
    Ok(array![
        [matrix[(1, 1)] / det, -matrix[(0, 1)] / det],
        [-matrix[(1, 0)] / det, matrix[(0, 0)] / det],
    ])
}

/// Correct a two-bit histogram for readout errors on its target and ancilla
/// qubits.
///
/// The histogram's classical bit 0 must hold the target outcome and bit 1
/// the ancilla outcome, as produced by the scheme assemblers. With all error
/// rates zero the result equals the input weights exactly.
pub fn mitigate_counts(
    histogram: &Histogram,
    target_error: &ReadoutError,
    ancilla_error: &ReadoutError,
) -> SchemeResult<QuasiDistribution> {
    let raw = Array1::from_iter(outcome_weights(&histogram.into())?);

    let correction = kron(
        &inverted(&assignment_matrix(target_error))?,
        &inverted(&assignment_matrix(ancilla_error))?,
    );
    let corrected = correction.dot(&raw);

    // Index i = target_bit * 2 + ancilla_bit, matching the Kronecker order.
    Ok([
        ("00", corrected[0b00]),
        ("01", corrected[0b01]),
        ("10", corrected[0b10]),
        ("11", corrected[0b11]),
    ]
    .into_iter()
    .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_histogram() -> Histogram {
        [("00", 800u64), ("01", 50), ("10", 100), ("11", 50)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_zero_rates_are_identity() {
        let zero = ReadoutError::new(0.0, 0.0);
        let corrected = mitigate_counts(&sample_histogram(), &zero, &zero).unwrap();

        assert_eq!(corrected.get("00"), 800.0);
        assert_eq!(corrected.get("01"), 50.0);
        assert_eq!(corrected.get("10"), 100.0);
        assert_eq!(corrected.get("11"), 50.0);
    }

    #[test]
    fn test_correction_undoes_symmetric_flips() {
        // With P(1|0) = P(0|1) = p on one qubit, a histogram generated by
        // flipping ideal counts through the assignment matrix must map back
        // to the ideal counts.
        let p = 0.1;
        let error = ReadoutError::new(p, p);
        let zero = ReadoutError::new(0.0, 0.0);

        // Ideal: all 1000 shots in "00". Flips on the target qubit move
        // p of them to "10".
        let observed: Histogram = [("00", 900u64), ("10", 100)].into_iter().collect();
        let corrected = mitigate_counts(&observed, &error, &zero).unwrap();

        assert!((corrected.get("00") - 1000.0).abs() < 1e-9);
        assert!(corrected.get("10").abs() < 1e-9);
    }

    #[test]
    fn test_corrected_weights_may_leave_unit_range() {
        let error = ReadoutError::new(0.2, 0.2);
        let observed: Histogram = [("00", 1000u64)].into_iter().collect();
        let corrected = mitigate_counts(&observed, &error, &error).unwrap();

        // Inverting pushes weight above the raw total and below zero.
        assert!(corrected.get("00") > 1000.0);
        assert!(corrected.get("11") > 0.0);
        assert!(corrected.get("01") < 0.0);
        assert!(corrected.get("10") < 0.0);
    }

    #[test]
    fn test_singular_calibration_rejected() {
        // Rates of one half make both columns identical.
        let singular = ReadoutError::new(0.5, 0.5);
        let zero = ReadoutError::new(0.0, 0.0);
        let result = mitigate_counts(&sample_histogram(), &singular, &zero);
        assert!(matches!(result, Err(SchemeError::SingularCalibration)));
    }

    #[test]
    fn test_total_weight_is_preserved() {
        // Assignment matrices are column-stochastic, so correction preserves
        // the total shot count.
        let target_error = ReadoutError::new(0.03, 0.08);
        let ancilla_error = ReadoutError::new(0.05, 0.01);
        let corrected =
            mitigate_counts(&sample_histogram(), &target_error, &ancilla_error).unwrap();
        assert!((corrected.total() - 1000.0).abs() < 1e-9);
    }
}
