//! Outcome distributions over two-bit measurement results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use qbench_hal::Histogram;

use crate::error::{SchemeError, SchemeResult};

/// A quasi-probability weighting of bitstrings.
///
/// Readout mitigation produces these: weights may be negative and need not
/// sum to one. Keys follow the histogram convention, character `i` is the
/// value of classical bit `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuasiDistribution(BTreeMap<String, f64>);

impl QuasiDistribution {
    /// Create an empty distribution.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set the weight for a bitstring.
    pub fn set(&mut self, bitstring: impl Into<String>, weight: f64) {
        self.0.insert(bitstring.into(), weight);
    }

    /// Get the weight for a bitstring, zero if absent.
    pub fn get(&self, bitstring: &str) -> f64 {
        self.0.get(bitstring).copied().unwrap_or(0.0)
    }

    /// Iterate over `(bitstring, weight)` entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl From<&Histogram> for QuasiDistribution {
    fn from(histogram: &Histogram) -> Self {
        histogram
            .iter()
            .map(|(key, count)| (key, count as f64))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for QuasiDistribution {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(bitstring, weight)| (bitstring.into(), weight))
                .collect(),
        )
    }
}

/// Collapse a two-bit distribution into weights indexed by
/// `target_bit * 2 + ancilla_bit`.
pub(crate) fn outcome_weights(distribution: &QuasiDistribution) -> SchemeResult<[f64; 4]> {
    let mut weights = [0.0; 4];
    for (key, weight) in distribution.iter() {
        weights[parse_key(key)?] += weight;
    }
    Ok(weights)
}

fn parse_key(key: &str) -> SchemeResult<usize> {
    let bytes = key.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(|b| matches!(b, b'0' | b'1')) {
        return Err(SchemeError::MalformedBitstring {
            key: key.to_string(),
        });
    }
    let target = (bytes[0] - b'0') as usize;
    let ancilla = (bytes[1] - b'0') as usize;
    Ok(target * 2 + ancilla)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_conversion() {
        let histogram: Histogram = [("00", 10u64), ("11", 30)].into_iter().collect();
        let distribution = QuasiDistribution::from(&histogram);
        assert_eq!(distribution.get("00"), 10.0);
        assert_eq!(distribution.get("11"), 30.0);
        assert_eq!(distribution.get("01"), 0.0);
        assert_eq!(distribution.total(), 40.0);
    }

    #[test]
    fn test_outcome_weights_indexing() {
        let distribution: QuasiDistribution =
            [("00", 1.0), ("01", 2.0), ("10", 3.0), ("11", 4.0)]
                .into_iter()
                .collect();
        let weights = outcome_weights(&distribution).unwrap();
        assert_eq!(weights, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_malformed_keys_rejected() {
        for key in ["0", "012", "0x", ""] {
            let distribution: QuasiDistribution = [(key, 1.0)].into_iter().collect();
            assert!(matches!(
                outcome_weights(&distribution),
                Err(SchemeError::MalformedBitstring { .. })
            ));
        }
    }

    #[test]
    fn test_negative_weights_allowed() {
        let distribution: QuasiDistribution = [("00", 1.02), ("01", -0.02)].into_iter().collect();
        let weights = outcome_weights(&distribution).unwrap();
        assert_eq!(weights[0], 1.02);
        assert_eq!(weights[1], -0.02);
    }
}
