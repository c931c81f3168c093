//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S-dagger gate.
    Sdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::Sdg => "sdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::Sdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_) => 1,

            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => 2,
        }
    }

    /// Rotation angle, for the parameterized gates.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(theta) | StandardGate::Ry(theta) => Some(*theta),
            _ => None,
        }
    }

    /// Whether swapping the two operands leaves the gate unchanged.
    pub fn is_symmetric(&self) -> bool {
        matches!(self, StandardGate::CZ | StandardGate::Swap)
    }
}
