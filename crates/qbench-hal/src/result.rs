//! Measurement result types.
//!
//! **Bit ordering invariant:** in a histogram key, the character at index `i`
//! is the value measured into classical bit `i`. A circuit that measures its
//! target qubit into clbit 0 and its ancilla into clbit 1 therefore produces
//! keys where `key[0]` is the target outcome and `key[1]` the ancilla outcome.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Histogram of measured bitstrings for one executed circuit.
///
/// Keys are bitstrings of equal length (one character per classical bit),
/// values are shot counts. The map is ordered so serialized histograms are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram(BTreeMap<String, u64>);

impl Histogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add counts for a bitstring, accumulating with any existing entry.
    pub fn add(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Get the count for a bitstring, zero if absent.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots recorded.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Iterate over `(bitstring, count)` entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of distinct bitstrings observed.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the histogram has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, u64>> for Histogram {
    fn from(map: BTreeMap<String, u64>) -> Self {
        Self(map)
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Histogram {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for (bitstring, count) in iter {
            histogram.add(bitstring, count);
        }
        histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates() {
        let mut histogram = Histogram::new();
        histogram.add("01", 3);
        histogram.add("01", 2);
        histogram.add("10", 1);

        assert_eq!(histogram.get("01"), 5);
        assert_eq!(histogram.get("10"), 1);
        assert_eq!(histogram.get("11"), 0);
        assert_eq!(histogram.total(), 6);
        assert_eq!(histogram.len(), 2);
    }

    #[test]
    fn test_iteration_is_key_ordered() {
        let histogram: Histogram = [("11", 1u64), ("00", 2), ("10", 3)].into_iter().collect();
        let keys: Vec<_> = histogram.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["00", "10", "11"]);
    }

    #[test]
    fn test_serialization_is_plain_map() {
        let histogram: Histogram = [("00", 40u64), ("11", 60)].into_iter().collect();
        let json = serde_json::to_string(&histogram).unwrap();
        assert_eq!(json, r#"{"00":40,"11":60}"#);

        let back: Histogram = serde_json::from_str(&json).unwrap();
        assert_eq!(back, histogram);
    }
}
