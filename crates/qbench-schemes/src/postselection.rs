//! Postselection scheme for discriminating a pair of von Neumann measurements.
//!
//! The scheme runs four circuits per qubit pair: two with the black box left
//! as the identity (`id_v0`, `id_v1`) and two with its conjugate applied
//! (`u_v0`, `u_v1`), each followed by one of the two conditional measurements
//! on the ancilla.
//!
//! A shot is kept only when the target outcome matches the circuit's
//! conditional branch, outcome 0 for `*_v0` circuits and outcome 1 for
//! `*_v1` circuits. Among kept shots, ancilla outcome 1 counts as a correct
//! guess for the identity circuits and outcome 0 for the u circuits. Kept
//! shots from all four circuits are pooled into a single success ratio.

use qbench_hal::{Backend, Histogram};
use qbench_ir::{Circuit, Component, ComponentRole, QubitId};

use crate::assembly::{attach_measurements, base_circuit, check_qubit_pair, check_role};
use crate::distributions::{QuasiDistribution, outcome_weights};
use crate::error::{SchemeError, SchemeResult};
use crate::roles::CircuitRole;

/// The four measurement circuits of a postselection experiment.
#[derive(Debug, Clone)]
pub struct PostselectionCircuits {
    /// Identity black box, first conditional measurement.
    pub id_v0: Circuit,
    /// Identity black box, second conditional measurement.
    pub id_v1: Circuit,
    /// Conjugated black box, first conditional measurement.
    pub u_v0: Circuit,
    /// Conjugated black box, second conditional measurement.
    pub u_v1: Circuit,
}

impl PostselectionCircuits {
    /// Circuits paired with their roles, in submission order.
    pub fn into_named(self) -> [(CircuitRole, Circuit); 4] {
        [
            (CircuitRole::IdV0, self.id_v0),
            (CircuitRole::IdV1, self.id_v1),
            (CircuitRole::UV0, self.u_v0),
            (CircuitRole::UV1, self.u_v1),
        ]
    }
}

/// Assemble the four postselection circuits for one qubit pair.
///
/// Components are given in their canonical frame and are retargeted so the
/// state preparation spans `(target, ancilla)`, the black box acts on the
/// target, and the conditional measurements act on the ancilla.
pub fn assemble_postselection_circuits(
    target: u32,
    ancilla: u32,
    state_prep: &Component,
    u_dag: &Component,
    v0_dag: &Component,
    v1_dag: &Component,
) -> SchemeResult<PostselectionCircuits> {
    check_qubit_pair(target, ancilla)?;
    check_role(state_prep, ComponentRole::StatePrep)?;
    check_role(u_dag, ComponentRole::UDag)?;
    check_role(v0_dag, ComponentRole::V0Dag)?;
    check_role(v1_dag, ComponentRole::V1Dag)?;

    Ok(PostselectionCircuits {
        id_v0: one_circuit(CircuitRole::IdV0, target, ancilla, state_prep, None, v0_dag)?,
        id_v1: one_circuit(CircuitRole::IdV1, target, ancilla, state_prep, None, v1_dag)?,
        u_v0: one_circuit(CircuitRole::UV0, target, ancilla, state_prep, Some(u_dag), v0_dag)?,
        u_v1: one_circuit(CircuitRole::UV1, target, ancilla, state_prep, Some(u_dag), v1_dag)?,
    })
}

fn one_circuit(
    role: CircuitRole,
    target: u32,
    ancilla: u32,
    state_prep: &Component,
    u_dag: Option<&Component>,
    v_dag: &Component,
) -> SchemeResult<Circuit> {
    let mut circuit = base_circuit(role, target, ancilla);
    circuit.append(state_prep.retarget(&[QubitId(target), QubitId(ancilla)])?)?;
    if let Some(u_dag) = u_dag {
        circuit.append(u_dag.retarget(&[QubitId(target)])?)?;
    }
    circuit.append(v_dag.retarget(&[QubitId(ancilla)])?)?;
    attach_measurements(&mut circuit, target, ancilla)?;
    Ok(circuit)
}

/// Estimate the discrimination probability from the four measured histograms.
pub fn compute_probabilities_from_postselection_measurements(
    id_v0: &Histogram,
    id_v1: &Histogram,
    u_v0: &Histogram,
    u_v1: &Histogram,
) -> SchemeResult<f64> {
    compute_probabilities_from_postselection_distributions(
        &id_v0.into(),
        &id_v1.into(),
        &u_v0.into(),
        &u_v1.into(),
    )
}

/// Estimate the discrimination probability from outcome distributions.
///
/// Accepts quasi-probability weights so that mitigated distributions can be
/// fed through the same estimator as raw counts.
pub fn compute_probabilities_from_postselection_distributions(
    id_v0: &QuasiDistribution,
    id_v1: &QuasiDistribution,
    u_v0: &QuasiDistribution,
    u_v1: &QuasiDistribution,
) -> SchemeResult<f64> {
    let id_v0 = outcome_weights(id_v0)?;
    let id_v1 = outcome_weights(id_v1)?;
    let u_v0 = outcome_weights(u_v0)?;
    let u_v1 = outcome_weights(u_v1)?;

    let successes = u_v0[0b00] + u_v1[0b10] + id_v0[0b01] + id_v1[0b11];
    let total = id_v0[0b00] + id_v0[0b01] + u_v0[0b00] + u_v0[0b01]
        + id_v1[0b10] + id_v1[0b11] + u_v1[0b10] + u_v1[0b11];

    if total == 0.0 {
        return Err(SchemeError::UndefinedProbability);
    }
    Ok(successes / total)
}

/// Run a complete postselection experiment on a backend.
///
/// Assembles the four circuits, executes them in one submission with
/// `num_shots` shots each and returns the estimated discrimination
/// probability.
pub async fn benchmark_using_postselection(
    backend: &dyn Backend,
    target: u32,
    ancilla: u32,
    state_prep: &Component,
    u_dag: &Component,
    v0_dag: &Component,
    v1_dag: &Component,
    num_shots: u32,
) -> SchemeResult<f64> {
    let circuits =
        assemble_postselection_circuits(target, ancilla, state_prep, u_dag, v0_dag, v1_dag)?;
    let batch: Vec<Circuit> = circuits
        .into_named()
        .into_iter()
        .map(|(_, circuit)| circuit)
        .collect();

    let histograms = backend.run(&batch, num_shots).await?;
    let [id_v0, id_v1, u_v0, u_v1]: [Histogram; 4] =
        histograms
            .try_into()
            .map_err(|returned: Vec<Histogram>| SchemeError::HistogramCountMismatch {
                expected: 4,
                got: returned.len(),
            })?;

    compute_probabilities_from_postselection_measurements(&id_v0, &id_v1, &u_v0, &u_v1)
}
