//! Reusable circuit fragments for discrimination experiments.
//!
//! A [`Component`] is a gate-only instruction sequence expressed on canonical
//! qubit indices `0..arity`. Experiment code retargets components onto
//! physical qubits when assembling full circuits, so a single component
//! definition serves every qubit pair on a device.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// The role a component plays in a discrimination circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentRole {
    /// Prepares the maximally entangled state on (target, ancilla).
    StatePrep,
    /// Adjoint of the unitary defining the second measurement.
    UDag,
    /// Adjoint of the first part of the optimal discriminator.
    V0Dag,
    /// Adjoint of the second part of the optimal discriminator.
    V1Dag,
    /// Two-qubit block direct-summing `V0Dag` and `V1Dag`.
    V0V1Dag,
}

impl ComponentRole {
    /// Number of canonical qubits a component with this role acts on.
    pub fn arity(&self) -> u32 {
        match self {
            ComponentRole::StatePrep | ComponentRole::V0V1Dag => 2,
            ComponentRole::UDag | ComponentRole::V0Dag | ComponentRole::V1Dag => 1,
        }
    }

    /// Role name as used in circuit names and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ComponentRole::StatePrep => "state_prep",
            ComponentRole::UDag => "u_dag",
            ComponentRole::V0Dag => "v0_dag",
            ComponentRole::V1Dag => "v1_dag",
            ComponentRole::V0V1Dag => "v0_v1_dag",
        }
    }
}

impl std::fmt::Display for ComponentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A gate-only instruction sequence on canonical qubits `0..arity`.
///
/// Components never carry measurements, barriers, or classical bits. The
/// arity is fixed by the role: state preparation and the direct-sum block
/// act on two qubits, the remaining roles on one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    role: ComponentRole,
    instructions: Vec<Instruction>,
}

impl Component {
    /// Create a component, validating that every instruction is a gate
    /// touching only canonical qubits below the role's arity.
    pub fn new(
        role: ComponentRole,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<Self> {
        let arity = role.arity();
        let instructions: Vec<Instruction> = instructions.into_iter().collect();
        for instruction in &instructions {
            if !instruction.is_gate() {
                return Err(IrError::NonGateInComponent {
                    role: role.name(),
                    found: instruction.name(),
                });
            }
            instruction.check_arity()?;
            for qubit in &instruction.qubits {
                if qubit.0 >= arity {
                    return Err(IrError::ComponentQubitOutOfRange {
                        role: role.name(),
                        arity,
                        qubit: qubit.0,
                    });
                }
            }
        }
        Ok(Self { role, instructions })
    }

    /// Get the component's role.
    pub fn role(&self) -> ComponentRole {
        self.role
    }

    /// Number of canonical qubits this component acts on.
    pub fn arity(&self) -> u32 {
        self.role.arity()
    }

    /// Get the instructions on canonical qubits.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Rewrite the instructions onto physical qubits.
    ///
    /// `mapping[i]` is the physical qubit that canonical qubit `i` maps to.
    /// The mapping length must equal the component's arity.
    pub fn retarget(&self, mapping: &[QubitId]) -> IrResult<Vec<Instruction>> {
        if mapping.len() != self.arity() as usize {
            return Err(IrError::RetargetCountMismatch {
                arity: self.arity(),
                got: mapping.len(),
            });
        }
        Ok(self
            .instructions
            .iter()
            .map(|inst| {
                let mut inst = inst.clone();
                for qubit in &mut inst.qubits {
                    *qubit = mapping[qubit.0 as usize];
                }
                inst
            })
            .collect())
    }
}
