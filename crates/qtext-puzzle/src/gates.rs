//! Puzzle gate vocabulary and the closed set of operations it resolves to.
//!
//! | Label | Aliases | Operation on target `q` (partner `p`) |
//! |-------|---------|---------------------------------------|
//! | `x` | `NOT` | `X(q)` |
//! | `y`, `z`, `h` | | `Y(q)`, `Z(q)`, `H(q)` |
//! | `ry(pi/4)`, `ry(-pi/4)` | | `Ry(±π/4, q)` |
//! | `rx(pi/4)`, `rx(-pi/4)` | | `Rx(±π/4, q)` |
//! | `cx` | `CNOT` | `Cx(control p, target q)` |
//! | `cz` | | `Cz(p, q)` |
//! | `swap` | | `Swap(p, q)` |
//! | `bloch` | | toggles the Bloch marker, no operation |

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use qtext_ir::{Circuit, IrResult, QubitId};

use crate::error::PuzzleError;

/// One of the two puzzle qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QubitLabel {
    /// Qubit `0`.
    Zero,
    /// Qubit `1`.
    One,
}

impl QubitLabel {
    /// Numeric index of the qubit.
    pub fn index(self) -> usize {
        match self {
            QubitLabel::Zero => 0,
            QubitLabel::One => 1,
        }
    }

    /// The other qubit.
    pub fn partner(self) -> Self {
        match self {
            QubitLabel::Zero => QubitLabel::One,
            QubitLabel::One => QubitLabel::Zero,
        }
    }

    /// Circuit operand for this qubit.
    pub fn id(self) -> QubitId {
        QubitId(self.index() as u32)
    }

    /// Label for a circuit operand, if it is one of the two puzzle qubits.
    pub fn from_id(id: QubitId) -> Option<Self> {
        match id.0 {
            0 => Some(QubitLabel::Zero),
            1 => Some(QubitLabel::One),
            _ => None,
        }
    }
}

/// Where an action applies: a single qubit or the symmetric slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "QubitKey", into = "String")]
pub enum QubitTarget {
    /// Qubit `0`.
    Zero,
    /// Qubit `1`.
    One,
    /// Either qubit; used for symmetric operations.
    Both,
}

impl QubitTarget {
    /// Every target in allow-list order.
    pub const ALL: [QubitTarget; 3] = [QubitTarget::Zero, QubitTarget::One, QubitTarget::Both];

    /// The allow-list key: `0`, `1` or `both`.
    pub fn key(self) -> &'static str {
        match self {
            QubitTarget::Zero => "0",
            QubitTarget::One => "1",
            QubitTarget::Both => "both",
        }
    }

    /// The single qubit this target names, if any.
    pub fn label(self) -> Option<QubitLabel> {
        match self {
            QubitTarget::Zero => Some(QubitLabel::Zero),
            QubitTarget::One => Some(QubitLabel::One),
            QubitTarget::Both => None,
        }
    }

    /// The qubit an operation acts on; `Both` resolves to qubit `1`.
    pub fn resolve(self) -> QubitLabel {
        self.label().unwrap_or(QubitLabel::One)
    }
}

impl From<QubitLabel> for QubitTarget {
    fn from(label: QubitLabel) -> Self {
        match label {
            QubitLabel::Zero => QubitTarget::Zero,
            QubitLabel::One => QubitTarget::One,
        }
    }
}

impl fmt::Display for QubitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for QubitTarget {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(QubitTarget::Zero),
            "1" => Ok(QubitTarget::One),
            "both" => Ok(QubitTarget::Both),
            other => Err(PuzzleError::UnknownQubit(other.to_string())),
        }
    }
}

impl From<QubitTarget> for String {
    fn from(value: QubitTarget) -> Self {
        value.key().to_string()
    }
}

/// Raw YAML form of a qubit target: `0`, `"0"` and `both` are all accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum QubitKey {
    Index(u8),
    Name(String),
}

impl TryFrom<QubitKey> for QubitTarget {
    type Error = PuzzleError;

    fn try_from(key: QubitKey) -> Result<Self, Self::Error> {
        match key {
            QubitKey::Index(0) => Ok(QubitTarget::Zero),
            QubitKey::Index(1) => Ok(QubitTarget::One),
            QubitKey::Index(n) => Err(PuzzleError::UnknownQubit(n.to_string())),
            QubitKey::Name(name) => name.parse(),
        }
    }
}

/// Player-facing qubit names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitNames {
    /// Name shown for qubit `0`.
    #[serde(rename = "0", alias = "zero")]
    pub zero: String,
    /// Name shown for qubit `1`.
    #[serde(rename = "1", alias = "one")]
    pub one: String,
}

impl QubitNames {
    /// Display name of a qubit.
    pub fn name(&self, label: QubitLabel) -> &str {
        match label {
            QubitLabel::Zero => &self.zero,
            QubitLabel::One => &self.one,
        }
    }

    /// Qubit with the given display name.
    pub fn lookup(&self, name: &str) -> Option<QubitLabel> {
        if name == self.zero {
            Some(QubitLabel::Zero)
        } else if name == self.one {
            Some(QubitLabel::One)
        } else {
            None
        }
    }
}

impl Default for QubitNames {
    fn default() -> Self {
        Self {
            zero: "q[0]".into(),
            one: "q[1]".into(),
        }
    }
}

/// An entry of the puzzle vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateName {
    X,
    Y,
    Z,
    H,
    RyPlus,
    RyMinus,
    RxPlus,
    RxMinus,
    Cz,
    Cx,
    Swap,
    /// Toggle the Bloch marker; not a gate.
    Bloch,
}

impl GateName {
    /// Canonical label.
    pub fn label(self) -> &'static str {
        match self {
            GateName::X => "x",
            GateName::Y => "y",
            GateName::Z => "z",
            GateName::H => "h",
            GateName::RyPlus => "ry(pi/4)",
            GateName::RyMinus => "ry(-pi/4)",
            GateName::RxPlus => "rx(pi/4)",
            GateName::RxMinus => "rx(-pi/4)",
            GateName::Cz => "cz",
            GateName::Cx => "cx",
            GateName::Swap => "swap",
            GateName::Bloch => "bloch",
        }
    }

    /// Resolve into an operation on `target`. Two-qubit operations use the
    /// partner qubit as control. Returns `None` for `bloch`.
    pub fn resolve(self, target: QubitTarget) -> Option<GateOp> {
        let q = target.resolve();
        let (tgt, ctrl) = (q.id(), q.partner().id());
        let op = match self {
            GateName::X => GateOp::X(tgt),
            GateName::Y => GateOp::Y(tgt),
            GateName::Z => GateOp::Z(tgt),
            GateName::H => GateOp::H(tgt),
            GateName::RyPlus => GateOp::Ry { theta: PI / 4.0, qubit: tgt },
            GateName::RyMinus => GateOp::Ry { theta: -PI / 4.0, qubit: tgt },
            GateName::RxPlus => GateOp::Rx { theta: PI / 4.0, qubit: tgt },
            GateName::RxMinus => GateOp::Rx { theta: -PI / 4.0, qubit: tgt },
            GateName::Cz => GateOp::Cz { control: ctrl, target: tgt },
            GateName::Cx => GateOp::Cx { control: ctrl, target: tgt },
            GateName::Swap => GateOp::Swap(ctrl, tgt),
            GateName::Bloch => return None,
        };
        Some(op)
    }
}

impl FromStr for GateName {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = match s.trim() {
            "x" | "NOT" => GateName::X,
            "y" => GateName::Y,
            "z" => GateName::Z,
            "h" => GateName::H,
            "ry(pi/4)" => GateName::RyPlus,
            "ry(-pi/4)" => GateName::RyMinus,
            "rx(pi/4)" => GateName::RxPlus,
            "rx(-pi/4)" => GateName::RxMinus,
            "cz" => GateName::Cz,
            "cx" | "CNOT" => GateName::Cx,
            "swap" => GateName::Swap,
            "bloch" => GateName::Bloch,
            other => return Err(PuzzleError::UnknownGate(other.to_string())),
        };
        Ok(name)
    }
}

impl fmt::Display for GateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolved operation on the two-qubit circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateOp {
    X(QubitId),
    Y(QubitId),
    Z(QubitId),
    H(QubitId),
    Rx { theta: f64, qubit: QubitId },
    Ry { theta: f64, qubit: QubitId },
    Cx { control: QubitId, target: QubitId },
    Cz { control: QubitId, target: QubitId },
    Swap(QubitId, QubitId),
}

impl GateOp {
    /// Append this operation to `circuit`.
    pub fn apply_to(&self, circuit: &mut Circuit) -> IrResult<()> {
        match *self {
            GateOp::X(q) => circuit.x(q)?,
            GateOp::Y(q) => circuit.y(q)?,
            GateOp::Z(q) => circuit.z(q)?,
            GateOp::H(q) => circuit.h(q)?,
            GateOp::Rx { theta, qubit } => circuit.rx(theta, qubit)?,
            GateOp::Ry { theta, qubit } => circuit.ry(theta, qubit)?,
            GateOp::Cx { control, target } => circuit.cx(control, target)?,
            GateOp::Cz { control, target } => circuit.cz(control, target)?,
            GateOp::Swap(a, b) => circuit.swap(a, b)?,
        };
        Ok(())
    }

    /// Short gate name.
    pub fn name(&self) -> &'static str {
        match self {
            GateOp::X(_) => "x",
            GateOp::Y(_) => "y",
            GateOp::Z(_) => "z",
            GateOp::H(_) => "h",
            GateOp::Rx { .. } => "rx",
            GateOp::Ry { .. } => "ry",
            GateOp::Cx { .. } => "cx",
            GateOp::Cz { .. } => "cz",
            GateOp::Swap(..) => "swap",
        }
    }

    /// Operands in call order.
    pub fn qubits(&self) -> Vec<QubitId> {
        match *self {
            GateOp::X(q) | GateOp::Y(q) | GateOp::Z(q) | GateOp::H(q) => vec![q],
            GateOp::Rx { qubit, .. } | GateOp::Ry { qubit, .. } => vec![qubit],
            GateOp::Cx { control, target } | GateOp::Cz { control, target } => {
                vec![control, target]
            }
            GateOp::Swap(a, b) => vec![a, b],
        }
    }

    /// Program line using display names, e.g. `qc.cx(q[0], q[1])`.
    pub fn listing(&self, names: &QubitNames) -> String {
        let operands: Vec<String> = self
            .qubits()
            .into_iter()
            .map(|q| match QubitLabel::from_id(q) {
                Some(label) => names.name(label).to_string(),
                None => q.to_string(),
            })
            .collect();
        match self {
            GateOp::Rx { theta, .. } | GateOp::Ry { theta, .. } => {
                format!("qc.{}({}, {})", self.name(), angle_text(*theta), operands.join(", "))
            }
            _ => format!("qc.{}({})", self.name(), operands.join(", ")),
        }
    }
}

fn angle_text(theta: f64) -> String {
    if (theta - PI / 4.0).abs() < 1e-12 {
        "pi/4".into()
    } else if (theta + PI / 4.0).abs() < 1e-12 {
        "-pi/4".into()
    } else {
        format!("{theta:.4}")
    }
}
