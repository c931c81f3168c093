//! High-level circuit builder API.

use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{Qubit, QubitId};

/// A quantum circuit.
///
/// Instructions are kept in application order. Every instruction is
/// validated against the circuit's qubits before it is appended, so a
/// failed call leaves the circuit unchanged.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with a register `q` of the given size.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        let mut circuit = Self::new(name);
        circuit.add_qreg("q", num_qubits);
        circuit
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = QubitId(self.qubits.len() as u32);
            self.qubits.push(Qubit::with_register(id, &name, i));
            ids.push(id);
        }
        ids
    }

    /// Validate and append an instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        instruction.validate()?;
        for q in &instruction.qubits {
            if q.index() >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit: *q,
                    gate_name: Some(instruction.name().to_string()),
                });
            }
        }
        self.instructions.push(instruction);
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

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit))
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

    /// Measure all qubits.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.apply(Instruction::measure(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
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
        self.qubits.len()
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// All instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of gate instructions (measurements and barriers excluded).
    pub fn num_ops(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Get the circuit depth, counting gate layers only.
    pub fn depth(&self) -> usize {
        let mut layer = vec![0usize; self.qubits.len()];
        for inst in self.instructions.iter().filter(|i| i.is_gate()) {
            let next = inst
                .qubits
                .iter()
                .map(|q| layer[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                layer[q.index()] = next;
            }
        }
        layer.into_iter().max().unwrap_or(0)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// {} ({} qubits)", self.name, self.qubits.len())?;
        for inst in &self.instructions {
            let operands: Vec<String> = inst
                .qubits
                .iter()
                .map(|q| self.qubits[q.index()].to_string())
                .collect();
            match inst.as_gate().and_then(StandardGate::angle) {
                Some(theta) => writeln!(f, "{}({theta:.4}) {};", inst.name(), operands.join(", "))?,
                None => writeln!(f, "{} {};", inst.name(), operands.join(", "))?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
    }

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 2);
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.qubits()[1].to_string(), "q[1]");
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .ry(PI / 4.0, QubitId(1))
            .unwrap();

        assert_eq!(circuit.num_ops(), 3);
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_parallel_depth() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit.h(QubitId(0)).unwrap().x(QubitId(1)).unwrap();
        assert_eq!(circuit.depth(), 1);
    }

    #[test]
    fn test_unknown_qubit_leaves_circuit_unchanged() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit.x(QubitId(0)).unwrap();
        let err = circuit.cx(QubitId(0), QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { qubit: QubitId(2), .. }));
        assert_eq!(circuit.num_ops(), 1);
    }

    #[test]
    fn test_display_listing() {
        let mut circuit = Circuit::with_size("bell", 2);
        circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        let text = circuit.to_string();
        assert!(text.contains("h q[0];"));
        assert!(text.contains("cx q[0], q[1];"));
    }
}
