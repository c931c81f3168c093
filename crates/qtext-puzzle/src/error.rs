//! Puzzle error types.

use thiserror::Error;

/// Result type for puzzle operations.
pub type PuzzleResult<T> = Result<T, PuzzleError>;

/// Errors that can occur while building or playing a puzzle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PuzzleError {
    /// Gate label outside the puzzle vocabulary.
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),

    /// Qubit label that is neither a qubit nor the symmetric target.
    #[error("Unknown qubit '{0}'")]
    UnknownQubit(String),

    /// Malformed Pauli string.
    #[error("Invalid Pauli string '{0}': expected two characters from I, X, Y, Z")]
    InvalidPauli(String),

    /// Observable that the active grid does not display.
    #[error("Observable {0} is not part of this grid")]
    UnknownObservable(String),

    /// Gate not offered by this puzzle.
    #[error("Gate '{0}' is not allowed in this puzzle")]
    GateNotAllowed(String),

    /// Qubit choice not offered for the chosen gate.
    #[error("Qubit '{qubit}' is not allowed for gate '{gate}'")]
    QubitNotAllowed {
        /// The chosen gate.
        gate: String,
        /// The rejected qubit label.
        qubit: String,
    },

    /// A qubit was chosen before a gate.
    #[error("Choose a gate first")]
    NoGateChosen,

    /// The action was confirmed before a qubit was chosen.
    #[error("Choose a qubit first")]
    NoQubitChosen,

    /// The puzzle is solved and accepts no further actions.
    #[error("Puzzle already solved")]
    Solved,

    /// Inconsistent puzzle definition.
    #[error("Invalid puzzle definition: {0}")]
    InvalidConfig(String),

    /// Circuit construction failed.
    #[error("Circuit error: {0}")]
    Circuit(#[from] qtext_ir::IrError),

    /// Sampling backend failed.
    #[error(transparent)]
    Backend(#[from] qtext_hal::HalError),

    /// Puzzle file could not be parsed.
    #[error("Parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
