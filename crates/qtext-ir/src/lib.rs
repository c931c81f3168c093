//! qtext Circuit Representation
//!
//! This crate provides the small circuit model used by the puzzle grid: a
//! fixed set of qubits, a closed set of standard gates, and an ordered list
//! of instructions. Circuits are applied in order by a backend, so there is
//! no graph representation.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qtext_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2);
//!
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_ops(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `Sdg` | 1 | S-dagger (used for Y-basis readout) |
//! | `Rx`, `Ry` | 1 | Rotation gates with a fixed angle |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CZ` | 2 | Controlled-Z |
//! | `Swap` | 2 | SWAP gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Qubit, QubitId};
