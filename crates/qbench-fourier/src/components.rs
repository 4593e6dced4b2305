//! Circuit components implementing the Fourier measurement family.
//!
//! The discrimination schemes consume five retargetable components: a Bell
//! state preparation, the conjugated black box `U†(φ)`, the two parts
//! `V0†(φ)` / `V1†(φ)` of the optimal discriminator, and their direct sum
//! `(V0 ⊕ V1)†(φ)`. This module builds those components at a fixed angle,
//! in one of several gatesets.
//!
//! The generic gateset uses textbook gates and relies on the executing
//! backend to compile them. The device gatesets spell the same unitaries
//! (up to global phase) in native gates so that assembled circuits can run
//! verbatim on the matching hardware; all gatesets produce identical
//! measurement distributions.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use qbench_ir::{Component, ComponentRole, Instruction, QubitId, StandardGate};
use qbench_schemes::SchemeError;

use crate::error::FourierResult;

/// Gateset the components are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gateset {
    /// Textbook gates (H, P, RY, ...); requires compilation on real devices.
    #[default]
    Generic,
    /// Rigetti native gates: RX, RZ and CZ.
    Rigetti,
    /// IBM Q native gates: SX, RZ, X and CX.
    Ibmq,
}

impl Gateset {
    /// Gateset label as used in experiment files.
    pub fn name(&self) -> &'static str {
        match self {
            Gateset::Generic => "generic",
            Gateset::Rigetti => "rigetti",
            Gateset::Ibmq => "ibmq",
        }
    }
}

impl std::fmt::Display for Gateset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The five components of a Fourier discrimination trial, bound to one
/// angle.
///
/// Components live in their canonical frame: qubit 0 is the target (and the
/// only qubit of the single-qubit components), qubit 1 the ancilla. The
/// scheme assemblers retarget them onto physical qubit pairs.
///
/// # Example
///
/// ```rust
/// use qbench_fourier::{FourierComponents, Gateset};
///
/// let components = FourierComponents::new(std::f64::consts::PI, Gateset::Generic).unwrap();
/// assert_eq!(components.state_preparation().arity(), 2);
/// assert_eq!(components.u_dag().arity(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FourierComponents {
    phi: f64,
    gateset: Gateset,
    state_preparation: Component,
    u_dag: Component,
    v0_dag: Component,
    v1_dag: Component,
    v0_v1_dag: Component,
}

impl FourierComponents {
    /// Build the components for angle `phi` in the given gateset.
    pub fn new(phi: f64, gateset: Gateset) -> FourierResult<Self> {
        let build = match gateset {
            Gateset::Generic => generic::components,
            Gateset::Rigetti => rigetti::components,
            Gateset::Ibmq => ibmq::components,
        };
        let [state_preparation, u_dag, v0_dag, v1_dag, v0_v1_dag] = build(phi)?;
        Ok(Self {
            phi,
            gateset,
            state_preparation,
            u_dag,
            v0_dag,
            v1_dag,
            v0_v1_dag,
        })
    }

    /// The angle the components are bound to.
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// The gateset the components are expressed in.
    pub fn gateset(&self) -> Gateset {
        self.gateset
    }

    /// Bell state preparation `|00⟩ → (|00⟩ + |11⟩)/√2`.
    pub fn state_preparation(&self) -> &Component {
        &self.state_preparation
    }

    /// Conjugated black box `U†(φ)`, applied to the target qubit in the
    /// `u`-branch circuits.
    pub fn u_dag(&self) -> &Component {
        &self.u_dag
    }

    /// Positive part of the optimal discriminator, conjugated.
    pub fn v0_dag(&self) -> &Component {
        &self.v0_dag
    }

    /// Negative part of the optimal discriminator, conjugated.
    pub fn v1_dag(&self) -> &Component {
        &self.v1_dag
    }

    /// Block direct sum `(V0 ⊕ V1)†(φ)` used by the direct-sum scheme.
    pub fn v0_v1_dag(&self) -> &Component {
        &self.v0_v1_dag
    }
}

/// Wrap component construction, routing IR errors through the scheme error.
fn component(
    role: ComponentRole,
    instructions: impl IntoIterator<Item = Instruction>,
) -> FourierResult<Component> {
    Ok(Component::new(role, instructions).map_err(SchemeError::from)?)
}

fn gate(gate: StandardGate, qubit: u32) -> Instruction {
    Instruction::single_qubit_gate(gate, QubitId(qubit))
}

type ComponentSet = [Component; 5];

mod generic {
    use super::*;

    pub(super) fn components(phi: f64) -> FourierResult<ComponentSet> {
        Ok([
            component(
                ComponentRole::StatePrep,
                [
                    gate(StandardGate::H, 0),
                    Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)),
                ],
            )?,
            component(
                ComponentRole::UDag,
                [
                    gate(StandardGate::H, 0),
                    gate(StandardGate::P(-phi), 0),
                    gate(StandardGate::H, 0),
                ],
            )?,
            component(ComponentRole::V0Dag, v0_dag(phi, 0))?,
            component(ComponentRole::V1Dag, {
                let mut instructions = v0_dag(phi, 0);
                instructions.push(gate(StandardGate::Rx(-PI), 0));
                instructions
            })?,
            component(ComponentRole::V0V1Dag, {
                let mut instructions = vec![gate(StandardGate::P(PI), 0)];
                instructions.extend(v0_dag(phi, 1));
                instructions.push(Instruction::two_qubit_gate(
                    StandardGate::CX,
                    QubitId(0),
                    QubitId(1),
                ));
                instructions
            })?,
        ])
    }

    pub(super) fn v0_dag(phi: f64, qubit: u32) -> Vec<Instruction> {
        vec![
            gate(StandardGate::Rz(-FRAC_PI_2), qubit),
            gate(StandardGate::Ry(-(phi + PI) / 2.0), qubit),
        ]
    }
}

mod rigetti {
    use super::*;

    /// H = RX(π/2) RZ(π/2) RX(π/2), up to global phase.
    fn hadamard(qubit: u32) -> [Instruction; 3] {
        [
            gate(StandardGate::Rx(FRAC_PI_2), qubit),
            gate(StandardGate::Rz(FRAC_PI_2), qubit),
            gate(StandardGate::Rx(FRAC_PI_2), qubit),
        ]
    }

    /// CNOT(c, t) = H(t) CZ(c, t) H(t), with native Hadamards.
    fn cnot(control: u32, target: u32) -> Vec<Instruction> {
        let mut instructions = hadamard(target).to_vec();
        instructions.push(Instruction::two_qubit_gate(
            StandardGate::CZ,
            QubitId(control),
            QubitId(target),
        ));
        instructions.extend(hadamard(target));
        instructions
    }

    fn v0_dag(phi: f64, qubit: u32) -> [Instruction; 4] {
        [
            gate(StandardGate::Rz(-FRAC_PI_2), qubit),
            gate(StandardGate::Rx(FRAC_PI_2), qubit),
            gate(StandardGate::Rz(-(phi + PI) / 2.0), qubit),
            gate(StandardGate::Rx(-FRAC_PI_2), qubit),
        ]
    }

    pub(super) fn components(phi: f64) -> FourierResult<ComponentSet> {
        Ok([
            component(ComponentRole::StatePrep, {
                let mut instructions = hadamard(0).to_vec();
                instructions.extend(cnot(0, 1));
                instructions
            })?,
            component(
                ComponentRole::UDag,
                [
                    gate(StandardGate::Rz(FRAC_PI_2), 0),
                    gate(StandardGate::Rx(FRAC_PI_2), 0),
                    gate(StandardGate::Rz(-phi), 0),
                    gate(StandardGate::Rx(-FRAC_PI_2), 0),
                    gate(StandardGate::Rz(-FRAC_PI_2), 0),
                ],
            )?,
            component(ComponentRole::V0Dag, v0_dag(phi, 0))?,
            component(
                ComponentRole::V1Dag,
                [
                    gate(StandardGate::Rz(FRAC_PI_2), 0),
                    gate(StandardGate::Rx(FRAC_PI_2), 0),
                    gate(StandardGate::Rz(-(PI - phi) / 2.0), 0),
                    gate(StandardGate::Rx(-FRAC_PI_2), 0),
                ],
            )?,
            component(ComponentRole::V0V1Dag, {
                let mut instructions = vec![gate(StandardGate::Rz(PI), 0)];
                instructions.extend(v0_dag(phi, 1));
                instructions.extend(cnot(0, 1));
                instructions
            })?,
        ])
    }
}

mod ibmq {
    use super::*;

    fn v0_dag(phi: f64, qubit: u32) -> [Instruction; 5] {
        [
            gate(StandardGate::Rz(-FRAC_PI_2), qubit),
            gate(StandardGate::SX, qubit),
            gate(StandardGate::Rz(-(phi + PI) / 2.0), qubit),
            gate(StandardGate::SX, qubit),
            gate(StandardGate::X, qubit),
        ]
    }

    pub(super) fn components(phi: f64) -> FourierResult<ComponentSet> {
        Ok([
            component(
                ComponentRole::StatePrep,
                [
                    gate(StandardGate::Rz(FRAC_PI_2), 0),
                    gate(StandardGate::SX, 0),
                    gate(StandardGate::Rz(FRAC_PI_2), 0),
                    Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)),
                ],
            )?,
            component(
                ComponentRole::UDag,
                [
                    gate(StandardGate::SX, 0),
                    gate(StandardGate::Rz(FRAC_PI_2), 0),
                    gate(StandardGate::SX, 0),
                    gate(StandardGate::Rz(-phi), 0),
                    gate(StandardGate::SX, 0),
                    gate(StandardGate::Rz(FRAC_PI_2), 0),
                    gate(StandardGate::SX, 0),
                ],
            )?,
            component(ComponentRole::V0Dag, v0_dag(phi, 0))?,
            component(
                ComponentRole::V1Dag,
                [
                    gate(StandardGate::Rz(FRAC_PI_2), 0),
                    gate(StandardGate::SX, 0),
                    gate(StandardGate::Rz(-(PI - phi) / 2.0), 0),
                    gate(StandardGate::X, 0),
                    gate(StandardGate::SX, 0),
                ],
            )?,
            component(ComponentRole::V0V1Dag, {
                let mut instructions = vec![gate(StandardGate::Rz(PI), 0)];
                instructions.extend(v0_dag(phi, 1));
                instructions.push(Instruction::two_qubit_gate(
                    StandardGate::CX,
                    QubitId(0),
                    QubitId(1),
                ));
                instructions
            })?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateset_serde_labels() {
        let json = serde_json::to_string(&Gateset::Rigetti).unwrap();
        assert_eq!(json, r#""rigetti""#);
        let gateset: Gateset = serde_json::from_str(r#""ibmq""#).unwrap();
        assert_eq!(gateset, Gateset::Ibmq);
    }

    #[test]
    fn test_unknown_gateset_is_rejected() {
        let result: Result<Gateset, _> = serde_json::from_str(r#""lucy""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_gateset_is_generic() {
        assert_eq!(Gateset::default(), Gateset::Generic);
    }

    #[test]
    fn test_components_carry_expected_roles() {
        for gateset in [Gateset::Generic, Gateset::Rigetti, Gateset::Ibmq] {
            let components = FourierComponents::new(0.5, gateset).unwrap();
            assert_eq!(
                components.state_preparation().role(),
                ComponentRole::StatePrep
            );
            assert_eq!(components.u_dag().role(), ComponentRole::UDag);
            assert_eq!(components.v0_dag().role(), ComponentRole::V0Dag);
            assert_eq!(components.v1_dag().role(), ComponentRole::V1Dag);
            assert_eq!(components.v0_v1_dag().role(), ComponentRole::V0V1Dag);
            assert_eq!(components.gateset(), gateset);
        }
    }

    #[test]
    fn test_generic_u_dag_conjugates_phase_with_hadamards() {
        let components = FourierComponents::new(1.25, Gateset::Generic).unwrap();
        let names: Vec<&str> = components
            .u_dag()
            .instructions()
            .iter()
            .map(Instruction::name)
            .collect();
        assert_eq!(names, vec!["h", "p", "h"]);
    }

    #[test]
    fn test_generic_v1_dag_extends_v0_dag() {
        let components = FourierComponents::new(0.7, Gateset::Generic).unwrap();
        let v0 = components.v0_dag().instructions();
        let v1 = components.v1_dag().instructions();
        assert_eq!(v1.len(), v0.len() + 1);
        assert_eq!(&v1[..v0.len()], v0);
    }

    #[test]
    fn test_rigetti_uses_only_native_gates() {
        let components = FourierComponents::new(2.1, Gateset::Rigetti).unwrap();
        for comp in [
            components.state_preparation(),
            components.u_dag(),
            components.v0_dag(),
            components.v1_dag(),
            components.v0_v1_dag(),
        ] {
            for instruction in comp.instructions() {
                assert!(
                    matches!(instruction.name(), "rx" | "rz" | "cz"),
                    "non-native gate {} in rigetti component",
                    instruction.name()
                );
            }
        }
    }

    #[test]
    fn test_ibmq_uses_only_native_gates() {
        let components = FourierComponents::new(2.1, Gateset::Ibmq).unwrap();
        for comp in [
            components.state_preparation(),
            components.u_dag(),
            components.v0_dag(),
            components.v1_dag(),
            components.v0_v1_dag(),
        ] {
            for instruction in comp.instructions() {
                assert!(
                    matches!(instruction.name(), "sx" | "rz" | "x" | "cx"),
                    "non-native gate {} in ibmq component",
                    instruction.name()
                );
            }
        }
    }

    #[test]
    fn test_phi_is_recorded() {
        let components = FourierComponents::new(0.25, Gateset::Generic).unwrap();
        assert_eq!(components.phi(), 0.25);
    }
}
