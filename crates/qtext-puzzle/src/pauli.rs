//! Two-qubit Pauli observables and their expectation values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::PuzzleError;

/// A single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pauli {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl Pauli {
    /// All four operators.
    pub const ALL: [Pauli; 4] = [Pauli::I, Pauli::X, Pauli::Y, Pauli::Z];

    /// Parse from a single character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Pauli::I),
            'X' => Some(Pauli::X),
            'Y' => Some(Pauli::Y),
            'Z' => Some(Pauli::Z),
            _ => None,
        }
    }

    /// The operator's letter.
    pub fn as_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }
}

/// A two-qubit Pauli string; `paulis[j]` acts on qubit `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PauliString {
    paulis: [Pauli; 2],
}

impl PauliString {
    /// Build from the operators on qubit 0 and qubit 1.
    pub const fn new(q0: Pauli, q1: Pauli) -> Self {
        Self { paulis: [q0, q1] }
    }

    /// `pauli` on `qubit`, identity on the partner.
    pub fn single(qubit: usize, pauli: Pauli) -> Self {
        Self::pair(qubit, pauli, Pauli::I)
    }

    /// `pauli` on `qubit` and `partner` on the other qubit.
    pub fn pair(qubit: usize, pauli: Pauli, partner: Pauli) -> Self {
        if qubit == 0 {
            Self::new(pauli, partner)
        } else {
            Self::new(partner, pauli)
        }
    }

    /// Operator acting on `qubit`.
    pub fn on(&self, qubit: usize) -> Pauli {
        self.paulis[qubit]
    }

    /// Both operators in qubit order.
    pub fn paulis(&self) -> [Pauli; 2] {
        self.paulis
    }

    /// Whether the observable involves both qubits.
    pub fn is_correlation(&self) -> bool {
        self.paulis.iter().all(|p| *p != Pauli::I)
    }

    /// Whether only `I` and `Z` appear, i.e. the observable is readable
    /// without a basis change.
    pub fn is_classical(&self) -> bool {
        self.paulis.iter().all(|p| matches!(p, Pauli::I | Pauli::Z))
    }

    /// Whether any operator is `Y`.
    pub fn has_y(&self) -> bool {
        self.paulis.contains(&Pauli::Y)
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.paulis[0].as_char(), self.paulis[1].as_char())
    }
}

impl FromStr for PauliString {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ops: Option<Vec<Pauli>> = s.trim().chars().map(Pauli::from_char).collect();
        match ops.as_deref() {
            Some([a, b]) => Ok(Self::new(*a, *b)),
            _ => Err(PuzzleError::InvalidPauli(s.to_string())),
        }
    }
}

impl TryFrom<String> for PauliString {
    type Error = PuzzleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PauliString> for String {
    fn from(value: PauliString) -> Self {
        value.to_string()
    }
}

/// Expectation values keyed by Pauli string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpectationMap(BTreeMap<PauliString, f64>);

impl ExpectationMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The |00⟩ values over the given box set: `ZI`, `IZ` and `ZZ` are 1,
    /// everything else 0.
    pub fn initial(paulis: impl IntoIterator<Item = PauliString>) -> Self {
        Self(
            paulis
                .into_iter()
                .map(|p| {
                    let value = if p.is_classical() { 1.0 } else { 0.0 };
                    (p, value)
                })
                .collect(),
        )
    }

    /// Value of an observable, if present.
    pub fn get(&self, pauli: &PauliString) -> Option<f64> {
        self.0.get(pauli).copied()
    }

    /// Set the value of an observable.
    pub fn insert(&mut self, pauli: PauliString, value: f64) {
        self.0.insert(pauli, value);
    }

    /// Whether the observable has a value.
    pub fn contains(&self, pauli: &PauliString) -> bool {
        self.0.contains_key(pauli)
    }

    /// Iterate in Pauli order.
    pub fn iter(&self) -> impl Iterator<Item = (&PauliString, &f64)> {
        self.0.iter()
    }

    /// Number of observables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(PauliString, f64)> for ExpectationMap {
    fn from_iter<T: IntoIterator<Item = (PauliString, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
