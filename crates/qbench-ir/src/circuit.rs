//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit.
///
/// A named, fixed-size instruction sequence with convenient builder methods
/// for the gates used in discrimination experiments. The instruction order is
/// the execution order; circuits are never rewritten after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    num_clbits: u32,
    /// Instructions in execution order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit with a fixed register size.
    pub fn new(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
        }
    }

    fn check_qubit(&self, qubit: QubitId) -> IrResult<()> {
        if qubit.0 >= self.num_qubits {
            return Err(IrError::QubitOutOfRange {
                qubit: qubit.0,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    fn check_clbit(&self, clbit: ClbitId) -> IrResult<()> {
        if clbit.0 >= self.num_clbits {
            return Err(IrError::ClbitOutOfRange {
                clbit: clbit.0,
                num_clbits: self.num_clbits,
            });
        }
        Ok(())
    }

    fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        instruction.check_arity()?;
        for qubit in &instruction.qubits {
            self.check_qubit(*qubit)?;
        }
        for clbit in &instruction.clbits {
            self.check_clbit(*clbit)?;
        }
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Append a sequence of instructions, validating each.
    pub fn append(
        &mut self,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<&mut Self> {
        for instruction in instructions {
            self.apply(instruction)?;
        }
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::SX, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rx(theta),
            qubit,
        ))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Ry(theta),
            qubit,
        ))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rz(theta),
            qubit,
        ))
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::P(theta), qubit))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Measure every qubit into the classical bit with the same index.
    ///
    /// Requires `num_clbits >= num_qubits`.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        if self.num_clbits < self.num_qubits {
            return Err(IrError::MeasureCountMismatch {
                qubits: self.num_qubits as usize,
                clbits: self.num_clbits as usize,
            });
        }
        for i in 0..self.num_qubits {
            self.apply(Instruction::measure(QubitId(i), ClbitId(i)))?;
        }
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = (0..self.num_qubits).map(QubitId).collect();
        self.apply(Instruction::barrier(qubits))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Get the instructions in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check whether the circuit holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Iterate over the measure instructions as `(qubit, clbit)` pairs.
    pub fn measurements(&self) -> impl Iterator<Item = (QubitId, ClbitId)> + '_ {
        self.instructions
            .iter()
            .filter(|inst| inst.is_measure())
            .map(|inst| (inst.qubits[0], inst.clbits[0]))
    }

    /// Collect the distinct qubits touched by any instruction.
    pub fn used_qubits(&self) -> Vec<QubitId> {
        let mut qubits: Vec<QubitId> = self
            .instructions
            .iter()
            .flat_map(|inst| inst.qubits.iter().copied())
            .collect();
        qubits.sort_unstable();
        qubits.dedup();
        qubits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_circuit() {
        let mut circuit = Circuit::new("bell", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure_all().unwrap();

        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.measurements().count(), 2);
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut circuit = Circuit::new("small", 1, 1);
        let err = circuit.h(QubitId(3)).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitOutOfRange {
                qubit: 3,
                num_qubits: 1
            }
        ));
    }

    #[test]
    fn test_clbit_out_of_range() {
        let mut circuit = Circuit::new("small", 2, 1);
        assert!(circuit.measure(QubitId(0), ClbitId(0)).is_ok());
        assert!(circuit.measure(QubitId(1), ClbitId(1)).is_err());
    }

    #[test]
    fn test_measure_all_requires_enough_clbits() {
        let mut circuit = Circuit::new("short", 2, 1);
        assert!(matches!(
            circuit.measure_all(),
            Err(IrError::MeasureCountMismatch { .. })
        ));
    }

    #[test]
    fn test_used_qubits_sorted_and_deduplicated() {
        let mut circuit = Circuit::new("pair", 5, 0);
        circuit.h(QubitId(4)).unwrap();
        circuit.cx(QubitId(4), QubitId(1)).unwrap();
        circuit.ry(0.5, QubitId(1)).unwrap();
        assert_eq!(circuit.used_qubits(), vec![QubitId(1), QubitId(4)]);
    }

    #[test]
    fn test_cx_rejects_same_control_and_target() {
        let mut circuit = Circuit::new("dup", 2, 0);
        assert!(circuit.cx(QubitId(0), QubitId(0)).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut circuit = Circuit::new("rt", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.p(0.25, QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure_all().unwrap();

        let json = serde_json::to_string(&circuit).unwrap();
        let parsed: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, circuit);
    }
}
