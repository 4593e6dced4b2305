//! Theoretical bounds for the Fourier family.

use num_complex::Complex64;

/// Optimal probability of discriminating between the Z-basis measurement and
/// the Fourier-family measurement with angle `phi`.
///
/// This is the Holevo-Helstrom bound `1/2 + |1 - e^{iφ}| / 4` for the pair
/// of projective measurements the experiments certify. No physical device
/// exceeds it; an ideal one saturates it, so the tabulated `ideal_prob`
/// column is the natural reference for measured probabilities.
///
/// # Example
///
/// ```rust
/// use qbench_fourier::discrimination_probability_upper_bound;
///
/// let p = discrimination_probability_upper_bound(std::f64::consts::FRAC_PI_2);
/// assert!((p - 0.8535533905932737).abs() < 1e-12);
/// ```
pub fn discrimination_probability_upper_bound(phi: f64) -> f64 {
    0.5 + 0.25 * (Complex64::new(1.0, 0.0) - Complex64::cis(phi)).norm()
}
