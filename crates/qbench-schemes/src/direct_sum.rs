//! Direct-sum scheme for discriminating a pair of von Neumann measurements.
//!
//! Instead of branching on the target outcome, this scheme realizes both
//! conditional measurements at once as a single two-qubit unitary, the block
//! direct sum of the two conjugated measurement bases. Only two circuits are
//! needed per qubit pair and every shot contributes to the estimate: ancilla
//! outcome 1 counts as a correct guess for the identity circuit, outcome 0
//! for the u circuit.

use qbench_hal::{Backend, Histogram};
use qbench_ir::{Circuit, Component, ComponentRole, QubitId};

use crate::assembly::{attach_measurements, base_circuit, check_qubit_pair, check_role};
use crate::distributions::{QuasiDistribution, outcome_weights};
use crate::error::{SchemeError, SchemeResult};
use crate::roles::CircuitRole;

/// The two measurement circuits of a direct-sum experiment.
#[derive(Debug, Clone)]
pub struct DirectSumCircuits {
    /// Identity black box followed by the direct-sum measurement.
    pub id: Circuit,
    /// Conjugated black box followed by the direct-sum measurement.
    pub u: Circuit,
}

impl DirectSumCircuits {
    /// Circuits paired with their roles, in submission order.
    pub fn into_named(self) -> [(CircuitRole, Circuit); 2] {
        [(CircuitRole::Id, self.id), (CircuitRole::U, self.u)]
    }
}

/// Assemble the two direct-sum circuits for one qubit pair.
///
/// The `v0_v1_dag` component spans both qubits and is retargeted so its
/// canonical qubit 0 lands on the target and qubit 1 on the ancilla.
pub fn assemble_direct_sum_circuits(
    target: u32,
    ancilla: u32,
    state_prep: &Component,
    u_dag: &Component,
    v0_v1_dag: &Component,
) -> SchemeResult<DirectSumCircuits> {
    check_qubit_pair(target, ancilla)?;
    check_role(state_prep, ComponentRole::StatePrep)?;
    check_role(u_dag, ComponentRole::UDag)?;
    check_role(v0_v1_dag, ComponentRole::V0V1Dag)?;

    Ok(DirectSumCircuits {
        id: one_circuit(CircuitRole::Id, target, ancilla, state_prep, None, v0_v1_dag)?,
        u: one_circuit(
            CircuitRole::U,
            target,
            ancilla,
            state_prep,
            Some(u_dag),
            v0_v1_dag,
        )?,
    })
}

fn one_circuit(
    role: CircuitRole,
    target: u32,
    ancilla: u32,
    state_prep: &Component,
    u_dag: Option<&Component>,
    v0_v1_dag: &Component,
) -> SchemeResult<Circuit> {
    let pair = [QubitId(target), QubitId(ancilla)];
    let mut circuit = base_circuit(role, target, ancilla);
    circuit.append(state_prep.retarget(&pair)?)?;
    if let Some(u_dag) = u_dag {
        circuit.append(u_dag.retarget(&[QubitId(target)])?)?;
    }
    circuit.append(v0_v1_dag.retarget(&pair)?)?;
    attach_measurements(&mut circuit, target, ancilla)?;
    Ok(circuit)
}

/// Estimate the discrimination probability from the two measured histograms.
pub fn compute_probabilities_from_direct_sum_measurements(
    id: &Histogram,
    u: &Histogram,
) -> SchemeResult<f64> {
    compute_probabilities_from_direct_sum_distributions(&id.into(), &u.into())
}

/// Estimate the discrimination probability from outcome distributions.
///
/// Accepts quasi-probability weights so that mitigated distributions can be
/// fed through the same estimator as raw counts.
pub fn compute_probabilities_from_direct_sum_distributions(
    id: &QuasiDistribution,
    u: &QuasiDistribution,
) -> SchemeResult<f64> {
    let id = outcome_weights(id)?;
    let u = outcome_weights(u)?;

    let successes = u[0b00] + u[0b10] + id[0b01] + id[0b11];
    let total: f64 = id.iter().sum::<f64>() + u.iter().sum::<f64>();

    if total == 0.0 {
        return Err(SchemeError::UndefinedProbability);
    }
    Ok(successes / total)
}

/// Run a complete direct-sum experiment on a backend.
///
/// Assembles both circuits, executes them in one submission with `num_shots`
/// shots each and returns the estimated discrimination probability.
pub async fn benchmark_using_direct_sum(
    backend: &dyn Backend,
    target: u32,
    ancilla: u32,
    state_prep: &Component,
    u_dag: &Component,
    v0_v1_dag: &Component,
    num_shots: u32,
) -> SchemeResult<f64> {
    let circuits = assemble_direct_sum_circuits(target, ancilla, state_prep, u_dag, v0_v1_dag)?;
    let batch: Vec<Circuit> = circuits
        .into_named()
        .into_iter()
        .map(|(_, circuit)| circuit)
        .collect();

    let histograms = backend.run(&batch, num_shots).await?;
    let [id, u]: [Histogram; 2] =
        histograms
            .try_into()
            .map_err(|returned: Vec<Histogram>| SchemeError::HistogramCountMismatch {
                expected: 2,
                got: returned.len(),
            })?;

    compute_probabilities_from_direct_sum_measurements(&id, &u)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use qbench_adapter_sim::SimulatorBackend;
    use qbench_ir::{Instruction, StandardGate};

    use super::*;

    fn bell_prep() -> Component {
        Component::new(
            ComponentRole::StatePrep,
            [
                Instruction::single_qubit_gate(StandardGate::H, QubitId(0)),
                Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)),
            ],
        )
        .unwrap()
    }

    fn hadamard_u_dag() -> Component {
        Component::new(
            ComponentRole::UDag,
            [Instruction::single_qubit_gate(StandardGate::H, QubitId(0))],
        )
        .unwrap()
    }

    fn block_v0_v1_dag() -> Component {
        // Ry on the ancilla followed by CX gives the block form directly
        // when the second basis is the X flip of the first.
        Component::new(
            ComponentRole::V0V1Dag,
            [
                Instruction::single_qubit_gate(StandardGate::Ry(-3.0 * PI / 4.0), QubitId(1)),
                Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_assembles_two_named_circuits() {
        let circuits =
            assemble_direct_sum_circuits(0, 1, &bell_prep(), &hadamard_u_dag(), &block_v0_v1_dag())
                .unwrap();
        let named = circuits.into_named();
        let roles: Vec<CircuitRole> = named.iter().map(|(role, _)| *role).collect();
        assert_eq!(roles, CircuitRole::DIRECT_SUM);
        for (role, circuit) in &named {
            assert_eq!(circuit.name(), role.name());
            assert_eq!(circuit.measurements().count(), 2);
        }
    }

    #[test]
    fn test_identity_circuit_skips_black_box() {
        let circuits =
            assemble_direct_sum_circuits(0, 1, &bell_prep(), &hadamard_u_dag(), &block_v0_v1_dag())
                .unwrap();
        assert_eq!(circuits.id.len(), 7);
        assert_eq!(circuits.u.len(), 8);
    }

    #[test]
    fn test_retargets_to_requested_pair() {
        let circuits =
            assemble_direct_sum_circuits(2, 0, &bell_prep(), &hadamard_u_dag(), &block_v0_v1_dag())
                .unwrap();
        assert_eq!(circuits.u.num_qubits(), 3);
        assert_eq!(circuits.u.used_qubits(), vec![QubitId(0), QubitId(2)]);
    }

    #[test]
    fn test_same_qubit_pair_rejected() {
        let result =
            assemble_direct_sum_circuits(1, 1, &bell_prep(), &hadamard_u_dag(), &block_v0_v1_dag());
        assert!(matches!(
            result,
            Err(SchemeError::InvalidQubitPair {
                target: 1,
                ancilla: 1
            })
        ));
    }

    #[test]
    fn test_role_mismatch_rejected() {
        let result =
            assemble_direct_sum_circuits(0, 1, &bell_prep(), &hadamard_u_dag(), &hadamard_u_dag());
        assert!(matches!(
            result,
            Err(SchemeError::RoleMismatch {
                expected: ComponentRole::V0V1Dag,
                got: ComponentRole::UDag
            })
        ));
    }

    #[test]
    fn test_every_shot_counts() {
        let id: Histogram = [("00", 3u64), ("01", 5)].into_iter().collect();
        let u: Histogram = [("00", 4u64), ("10", 2), ("01", 2)].into_iter().collect();

        // Successes: 5 from the id circuit, 4 + 2 from the u circuit.
        let p = compute_probabilities_from_direct_sum_measurements(&id, &u).unwrap();
        assert!((p - 11.0 / 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_histograms_undefined() {
        let result =
            compute_probabilities_from_direct_sum_measurements(&Histogram::new(), &Histogram::new());
        assert!(matches!(result, Err(SchemeError::UndefinedProbability)));
    }

    #[tokio::test]
    async fn test_benchmark_matches_analytic_probability() {
        // Same component family as the postselection scheme, so the same
        // (2 + sqrt(2)) / 4 discrimination probability applies.
        let backend = SimulatorBackend::new();
        let probability = benchmark_using_direct_sum(
            &backend,
            0,
            1,
            &bell_prep(),
            &hadamard_u_dag(),
            &block_v0_v1_dag(),
            100_000,
        )
        .await
        .unwrap();

        let expected = (2.0 + 2.0_f64.sqrt()) / 4.0;
        assert!(
            (probability - expected).abs() < 0.01,
            "probability {probability} not within 0.01 of {expected}"
        );
    }
}
