//! Result documents.
//!
//! A [`FourierDiscriminationResult`] is the persisted output of a benchmark
//! run. Synchronous runs store measured histograms directly; asynchronous
//! runs store batch records pairing each backend job with the ordered list
//! of circuit keys it covers, and are later resolved into the same
//! histogram form. The document is the sole state carrier between the
//! submitting process and the resolving one.

use serde::{Deserialize, Serialize};

use qbench_hal::{BackendDescription, Histogram, JobId, ReadoutError};
use qbench_schemes::{CircuitRole, QuasiDistribution};

use crate::experiment::FourierExperimentSet;

/// Identifies one circuit within an experiment set.
///
/// Serialized as the 4-element sequence `[target, ancilla, role, phi]`.
/// Batch records carry these in submission order; together with the
/// order-preserving retrieve contract they are the only link between a
/// histogram and the circuit that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitKey(pub u32, pub u32, pub CircuitRole, pub f64);

impl CircuitKey {
    /// Create a key.
    pub fn new(target: u32, ancilla: u32, role: CircuitRole, phi: f64) -> Self {
        Self(target, ancilla, role, phi)
    }

    /// Target qubit of the circuit.
    pub fn target(&self) -> u32 {
        self.0
    }

    /// Ancilla qubit of the circuit.
    pub fn ancilla(&self) -> u32 {
        self.1
    }

    /// Role of the circuit within its trial.
    pub fn role(&self) -> CircuitRole {
        self.2
    }

    /// Angle the circuit was bound to.
    pub fn phi(&self) -> f64 {
        self.3
    }

    /// The `(target, ancilla, phi)` trial this circuit belongs to.
    pub fn trial(&self) -> (u32, u32, f64) {
        (self.0, self.1, self.3)
    }
}

/// Readout calibration for the two qubits of a trial, as published by the
/// backend at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MitigationInfo {
    /// Calibration of the target qubit.
    pub target: ReadoutError,
    /// Calibration of the ancilla qubit.
    pub ancilla: ReadoutError,
}

/// Measured data for a single circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultForCircuit {
    /// Role of the circuit within its trial.
    pub name: CircuitRole,
    /// Raw measured histogram.
    pub histogram: Histogram,
    /// Readout calibration used for mitigation, when the backend published
    /// one for both qubits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation_info: Option<MitigationInfo>,
    /// Histogram corrected for readout errors; entries may be negative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigated_histogram: Option<QuasiDistribution>,
}

/// All measured circuits of one `(pair, angle)` trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleResult {
    /// Target qubit of the trial.
    pub target: u32,
    /// Ancilla qubit of the trial.
    pub ancilla: u32,
    /// Angle of the trial.
    pub phi: f64,
    /// Per-circuit results, in the method's role order.
    pub results_per_circuit: Vec<ResultForCircuit>,
}

/// One submitted batch of an asynchronous run: the backend job and the keys
/// of the circuits it covers, in submission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    /// Backend-issued job identifier.
    pub job_id: JobId,
    /// Keys of the batch circuits; `keys[i]` describes circuit `i` of the
    /// job.
    pub keys: Vec<CircuitKey>,
}

/// Provenance carried by every result document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// The experiment set the document was produced from.
    pub experiments: FourierExperimentSet,
    /// The backend the circuits ran (or are running) on.
    pub backend_description: BackendDescription,
}

/// Payload of a result document: job references awaiting resolution, or
/// measured histograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultData {
    /// Unresolved asynchronous run.
    BatchRecords(Vec<BatchRecord>),
    /// Synchronous or resolved run.
    SingleResults(Vec<SingleResult>),
}

/// Persisted output of a benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FourierDiscriminationResult {
    /// Experiment set and backend the data came from.
    pub metadata: ResultMetadata,
    /// Job references or measured histograms.
    pub data: ResultData,
}

impl FourierDiscriminationResult {
    /// Whether the document holds measured histograms rather than job
    /// references.
    pub fn is_resolved(&self) -> bool {
        matches!(self.data, ResultData::SingleResults(_))
    }

    /// The batch records of an unresolved document, if any.
    pub fn batch_records(&self) -> Option<&[BatchRecord]> {
        match &self.data {
            ResultData::BatchRecords(records) => Some(records),
            ResultData::SingleResults(_) => None,
        }
    }

    /// The trial results of a resolved document, if any.
    pub fn single_results(&self) -> Option<&[SingleResult]> {
        match &self.data {
            ResultData::BatchRecords(_) => None,
            ResultData::SingleResults(results) => Some(results),
        }
    }
}

#[cfg(test)]
mod tests {
    use qbench_hal::BackendDescription;

    use crate::experiment::{AnglesRange, Method, QubitPair};
    use crate::Gateset;

    use super::*;

    fn metadata() -> ResultMetadata {
        ResultMetadata {
            experiments: FourierExperimentSet::new(
                vec![QubitPair::new(0, 1)],
                AnglesRange::new(0.0, 1.0, 2),
                Gateset::Generic,
                Method::DirectSum,
                10,
            ),
            backend_description: BackendDescription::new("sim", "simulator"),
        }
    }

    #[test]
    fn test_circuit_key_serializes_as_sequence() {
        let key = CircuitKey::new(0, 1, CircuitRole::UV0, 1.5);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#"[0,1,"u_v0",1.5]"#);
        let parsed: CircuitKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_batch_document_roundtrips_through_yaml() {
        let document = FourierDiscriminationResult {
            metadata: metadata(),
            data: ResultData::BatchRecords(vec![BatchRecord {
                job_id: JobId::new("job-7"),
                keys: vec![
                    CircuitKey::new(0, 1, CircuitRole::Id, 0.0),
                    CircuitKey::new(0, 1, CircuitRole::U, 0.0),
                ],
            }]),
        };
        let yaml = serde_yaml_ng::to_string(&document).unwrap();
        let parsed: FourierDiscriminationResult = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(parsed, document);
        assert!(!parsed.is_resolved());
        assert_eq!(parsed.batch_records().unwrap().len(), 1);
    }

    #[test]
    fn test_resolved_document_roundtrips_through_yaml() {
        let histogram: Histogram = [("00", 6u64), ("01", 4)].into_iter().collect();
        let document = FourierDiscriminationResult {
            metadata: metadata(),
            data: ResultData::SingleResults(vec![SingleResult {
                target: 0,
                ancilla: 1,
                phi: 0.0,
                results_per_circuit: vec![ResultForCircuit {
                    name: CircuitRole::Id,
                    histogram,
                    mitigation_info: None,
                    mitigated_histogram: None,
                }],
            }]),
        };
        let yaml = serde_yaml_ng::to_string(&document).unwrap();
        assert!(!yaml.contains("mitigation_info"));
        let parsed: FourierDiscriminationResult = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(parsed, document);
        assert!(parsed.is_resolved());
        assert_eq!(parsed.single_results().unwrap().len(), 1);
    }

    #[test]
    fn test_mitigation_fields_roundtrip_when_present() {
        let histogram: Histogram = [("00", 6u64), ("11", 4)].into_iter().collect();
        let entry = ResultForCircuit {
            name: CircuitRole::U,
            histogram,
            mitigation_info: Some(MitigationInfo {
                target: ReadoutError::new(0.21, 0.37),
                ancilla: ReadoutError::new(0.21, 0.37),
            }),
            mitigated_histogram: Some([("00", 0.9), ("11", 0.1)].into_iter().collect()),
        };
        let yaml = serde_yaml_ng::to_string(&entry).unwrap();
        let parsed: ResultForCircuit = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(parsed, entry);
    }
}
