//! Shared helpers for assembling discrimination circuits.
//!
//! Circuits act on two physical qubits of a larger register. The target
//! outcome always lands in classical bit 0 and the ancilla outcome in
//! classical bit 1, regardless of the physical indices.

use qbench_ir::{Circuit, ClbitId, Component, ComponentRole, QubitId};

use crate::error::{SchemeError, SchemeResult};
use crate::roles::CircuitRole;

pub(crate) fn check_qubit_pair(target: u32, ancilla: u32) -> SchemeResult<()> {
    if target == ancilla {
        return Err(SchemeError::InvalidQubitPair { target, ancilla });
    }
    Ok(())
}

pub(crate) fn check_role(component: &Component, expected: ComponentRole) -> SchemeResult<()> {
    if component.role() != expected {
        return Err(SchemeError::RoleMismatch {
            expected,
            got: component.role(),
        });
    }
    Ok(())
}

pub(crate) fn base_circuit(role: CircuitRole, target: u32, ancilla: u32) -> Circuit {
    Circuit::new(role.name(), target.max(ancilla) + 1, 2)
}

pub(crate) fn attach_measurements(
    circuit: &mut Circuit,
    target: u32,
    ancilla: u32,
) -> SchemeResult<()> {
    circuit.barrier([QubitId(target), QubitId(ancilla)])?;
    circuit.measure(QubitId(target), ClbitId(0))?;
    circuit.measure(QubitId(ancilla), ClbitId(1))?;
    Ok(())
}
