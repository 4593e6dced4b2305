//! Experiment set descriptors.
//!
//! A [`FourierExperimentSet`] is the parsed form of an experiment YAML file:
//! which qubit pairs to certify, the angle grid, the gateset, the estimation
//! method and the shot count. Descriptors are plain data; [`validate`]
//! (`FourierExperimentSet::validate`) enforces the structural rules before
//! any circuit is assembled.

use serde::{Deserialize, Serialize};

use qbench_schemes::CircuitRole;

use crate::components::Gateset;
use crate::error::{FourierError, FourierResult};

/// Document type tag carried by experiment files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExperimentType {
    /// Fourier-family measurement discrimination.
    #[default]
    #[serde(rename = "discrimination-fourier")]
    DiscriminationFourier,
}

/// A (target, ancilla) pair of physical qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QubitPair {
    /// Qubit the black box acts on.
    pub target: u32,
    /// Qubit the discriminator acts on.
    pub ancilla: u32,
}

impl QubitPair {
    /// Create a pair.
    pub fn new(target: u32, ancilla: u32) -> Self {
        Self { target, ancilla }
    }

    fn validate(&self) -> FourierResult<()> {
        if self.target == self.ancilla {
            return Err(FourierError::InvalidExperiment(format!(
                "target and ancilla must differ, both are {}",
                self.target
            )));
        }
        Ok(())
    }
}

/// An inclusive uniform grid of angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnglesRange {
    /// First angle of the grid.
    pub start: f64,
    /// Last angle of the grid.
    pub stop: f64,
    /// Number of grid points.
    pub num_steps: usize,
}

impl AnglesRange {
    /// Create a range.
    pub fn new(start: f64, stop: f64, num_steps: usize) -> Self {
        Self {
            start,
            stop,
            num_steps,
        }
    }

    /// Iterate the grid points in ascending order.
    ///
    /// The grid spans `[start, stop]` inclusively with `num_steps` uniform
    /// points; a single-step range yields exactly `[start]`.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let Self {
            start,
            stop,
            num_steps,
        } = *self;
        let last = num_steps.saturating_sub(1);
        let step = if last > 0 {
            (stop - start) / last as f64
        } else {
            0.0
        };
        (0..num_steps).map(move |i| {
            if i == last && last > 0 {
                stop
            } else {
                start + step * i as f64
            }
        })
    }

    fn validate(&self) -> FourierResult<()> {
        if self.num_steps < 1 {
            return Err(FourierError::InvalidExperiment(
                "angles.num_steps must be at least 1".into(),
            ));
        }
        if self.start > self.stop {
            return Err(FourierError::InvalidExperiment(format!(
                "angles.start ({}) must not exceed angles.stop ({})",
                self.start, self.stop
            )));
        }
        if (self.start == self.stop) != (self.num_steps == 1) {
            return Err(FourierError::InvalidExperiment(
                "angles.num_steps must be 1 exactly when start equals stop".into(),
            ));
        }
        Ok(())
    }
}

/// Probability estimation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Four circuits per trial; shots are postselected on the target
    /// outcome.
    Postselection,
    /// Two circuits per trial; every shot counts.
    DirectSum,
}

impl Method {
    /// Method label as used in experiment files.
    pub fn name(&self) -> &'static str {
        match self {
            Method::Postselection => "postselection",
            Method::DirectSum => "direct_sum",
        }
    }

    /// The circuit roles this method runs per trial, in submission order.
    pub fn roles(&self) -> &'static [CircuitRole] {
        match self {
            Method::Postselection => &CircuitRole::POSTSELECTION,
            Method::DirectSum => &CircuitRole::DIRECT_SUM,
        }
    }

    /// Number of circuits per (pair, angle) trial.
    pub fn circuit_count(&self) -> usize {
        self.roles().len()
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A set of Fourier discrimination experiments, as described by an
/// experiment file.
///
/// # Example
///
/// ```rust
/// use qbench_fourier::FourierExperimentSet;
///
/// let experiments: FourierExperimentSet = serde_yaml_ng::from_str(
///     r#"
///     type: discrimination-fourier
///     qubits:
///       - target: 0
///         ancilla: 1
///     angles:
///       start: 0
///       stop: 6.2831853
///       num_steps: 5
///     gateset: ibmq
///     method: direct_sum
///     num_shots: 1000
///     "#,
/// )
/// .unwrap();
/// experiments.validate().unwrap();
/// assert_eq!(experiments.num_circuits(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FourierExperimentSet {
    /// Document type tag.
    #[serde(rename = "type")]
    pub experiment_type: ExperimentType,
    /// Qubit pairs to certify, each giving one trial per angle.
    pub qubits: Vec<QubitPair>,
    /// Angle grid shared by all pairs.
    pub angles: AnglesRange,
    /// Gateset the circuits are expressed in.
    #[serde(default)]
    pub gateset: Gateset,
    /// Probability estimation method.
    pub method: Method,
    /// Shots per circuit.
    pub num_shots: u32,
}

impl FourierExperimentSet {
    /// Create an experiment set.
    pub fn new(
        qubits: Vec<QubitPair>,
        angles: AnglesRange,
        gateset: Gateset,
        method: Method,
        num_shots: u32,
    ) -> Self {
        Self {
            experiment_type: ExperimentType::DiscriminationFourier,
            qubits,
            angles,
            gateset,
            method,
            num_shots,
        }
    }

    /// Check the structural rules of the descriptor.
    ///
    /// Rules: at least one pair; target ≠ ancilla in every pair; pairs
    /// pairwise distinct; a well-formed angle grid; at least one shot.
    pub fn validate(&self) -> FourierResult<()> {
        if self.qubits.is_empty() {
            return Err(FourierError::InvalidExperiment(
                "at least one qubit pair is required".into(),
            ));
        }
        for pair in &self.qubits {
            pair.validate()?;
        }
        for (i, pair) in self.qubits.iter().enumerate() {
            if self.qubits[..i].contains(pair) {
                return Err(FourierError::InvalidExperiment(format!(
                    "duplicate qubit pair (target {}, ancilla {})",
                    pair.target, pair.ancilla
                )));
            }
        }
        self.angles.validate()?;
        if self.num_shots < 1 {
            return Err(FourierError::InvalidExperiment(
                "num_shots must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Enumerate `(pair, angle)` trials in execution order: pairs in
    /// configured order, angles ascending within each pair.
    pub fn enumerate_experiment_labels(&self) -> impl Iterator<Item = (QubitPair, f64)> + '_ {
        self.qubits
            .iter()
            .flat_map(move |pair| self.angles.iter().map(move |phi| (*pair, phi)))
    }

    /// Total number of circuits the set expands to.
    pub fn num_circuits(&self) -> usize {
        self.qubits.len() * self.angles.num_steps * self.method.circuit_count()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    fn experiments() -> FourierExperimentSet {
        FourierExperimentSet::new(
            vec![QubitPair::new(0, 1), QubitPair::new(1, 0)],
            AnglesRange::new(0.0, 2.0 * PI, 3),
            Gateset::Generic,
            Method::Postselection,
            100,
        )
    }

    #[test]
    fn test_valid_experiments_pass_validation() {
        experiments().validate().unwrap();
    }

    #[test]
    fn test_angle_grid_is_inclusive_and_uniform() {
        let angles: Vec<f64> = AnglesRange::new(0.0, 2.0 * PI, 3).iter().collect();
        assert_eq!(angles, vec![0.0, PI, 2.0 * PI]);
    }

    #[test]
    fn test_single_step_grid_yields_start() {
        let angles: Vec<f64> = AnglesRange::new(1.5, 1.5, 1).iter().collect();
        assert_eq!(angles, vec![1.5]);
    }

    #[test]
    fn test_grid_hits_stop_exactly() {
        let angles: Vec<f64> = AnglesRange::new(0.0, 2.0, 7).iter().collect();
        assert_eq!(angles.len(), 7);
        assert_eq!(*angles.last().unwrap(), 2.0);
    }

    #[test]
    fn test_equal_target_and_ancilla_is_rejected() {
        let mut set = experiments();
        set.qubits.push(QubitPair::new(3, 3));
        assert!(matches!(
            set.validate(),
            Err(FourierError::InvalidExperiment(_))
        ));
    }

    #[test]
    fn test_duplicate_pairs_are_rejected() {
        let mut set = experiments();
        set.qubits.push(QubitPair::new(0, 1));
        assert!(matches!(
            set.validate(),
            Err(FourierError::InvalidExperiment(_))
        ));
    }

    #[test]
    fn test_reversed_pair_is_not_a_duplicate() {
        experiments().validate().unwrap();
    }

    #[test]
    fn test_reversed_angle_range_is_rejected() {
        let mut set = experiments();
        set.angles = AnglesRange::new(1.0, 0.0, 2);
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_degenerate_range_needs_single_step() {
        let mut set = experiments();
        set.angles = AnglesRange::new(1.0, 1.0, 3);
        assert!(set.validate().is_err());
        set.angles = AnglesRange::new(1.0, 1.0, 1);
        set.validate().unwrap();
    }

    #[test]
    fn test_single_step_needs_degenerate_range() {
        let mut set = experiments();
        set.angles = AnglesRange::new(0.0, 1.0, 1);
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_zero_steps_is_rejected() {
        let mut set = experiments();
        set.angles = AnglesRange::new(0.0, 1.0, 0);
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_zero_shots_is_rejected() {
        let mut set = experiments();
        set.num_shots = 0;
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_empty_pairs_are_rejected() {
        let mut set = experiments();
        set.qubits.clear();
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_labels_walk_pairs_then_angles() {
        let set = experiments();
        let labels: Vec<(QubitPair, f64)> = set.enumerate_experiment_labels().collect();
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0], (QubitPair::new(0, 1), 0.0));
        assert_eq!(labels[2], (QubitPair::new(0, 1), 2.0 * PI));
        assert_eq!(labels[3], (QubitPair::new(1, 0), 0.0));
    }

    #[test]
    fn test_num_circuits_counts_method_roles() {
        let mut set = experiments();
        assert_eq!(set.num_circuits(), 2 * 3 * 4);
        set.method = Method::DirectSum;
        assert_eq!(set.num_circuits(), 2 * 3 * 2);
    }

    #[test]
    fn test_wrong_type_tag_is_rejected_at_parse() {
        let result: Result<FourierExperimentSet, _> = serde_yaml_ng::from_str(
            r#"
            type: discrimination-something-else
            qubits: [{target: 0, ancilla: 1}]
            angles: {start: 0, stop: 1, num_steps: 2}
            method: direct_sum
            num_shots: 10
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_gateset_defaults_to_generic() {
        let set: FourierExperimentSet = serde_yaml_ng::from_str(
            r#"
            type: discrimination-fourier
            qubits: [{target: 0, ancilla: 1}]
            angles: {start: 0, stop: 1, num_steps: 2}
            method: postselection
            num_shots: 10
            "#,
        )
        .unwrap();
        assert_eq!(set.gateset, Gateset::Generic);
    }

    #[test]
    fn test_roundtrips_through_yaml() {
        let set = experiments();
        let yaml = serde_yaml_ng::to_string(&set).unwrap();
        let parsed: FourierExperimentSet = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(parsed, set);
    }
}
