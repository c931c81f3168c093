//! Grid geometry: which observables are shown and where.

use serde::{Deserialize, Serialize};

use crate::pauli::{Pauli, PauliString};

/// How expectation values are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Gray circles whose shade encodes the value.
    Circle,
    /// White circles with bar indicators.
    #[default]
    Line,
    /// Line mode with the Y observables added.
    Y,
}

impl Mode {
    /// Whether the Y observables are part of the grid.
    pub fn y_boxes(self) -> bool {
        self == Mode::Y
    }

    /// Whether values are drawn as bars.
    pub fn draws_lines(self) -> bool {
        matches!(self, Mode::Line | Mode::Y)
    }
}

const XZ_BOXES: [(&str, (f64, f64)); 8] = [
    ("IZ", (-1.0, 2.0)),
    ("IX", (-2.0, 3.0)),
    ("ZI", (1.0, 2.0)),
    ("XI", (2.0, 3.0)),
    ("XZ", (1.0, 4.0)),
    ("ZZ", (0.0, 3.0)),
    ("ZX", (-1.0, 4.0)),
    ("XX", (0.0, 5.0)),
];

const XYZ_BOXES: [(&str, (f64, f64)); 15] = [
    ("IZ", (-1.0, 2.0)),
    ("IX", (-3.0, 4.0)),
    ("IY", (-2.0, 3.0)),
    ("XI", (3.0, 4.0)),
    ("YI", (2.0, 3.0)),
    ("ZI", (1.0, 2.0)),
    ("XZ", (2.0, 5.0)),
    ("YZ", (1.0, 4.0)),
    ("ZZ", (0.0, 3.0)),
    ("XX", (0.0, 7.0)),
    ("YX", (-1.0, 6.0)),
    ("ZX", (-2.0, 5.0)),
    ("XY", (1.0, 6.0)),
    ("YY", (0.0, 5.0)),
    ("ZY", (-1.0, 4.0)),
];

/// Box positions of the grid, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxLayout {
    y_boxes: bool,
    boxes: Vec<(PauliString, (f64, f64))>,
}

impl BoxLayout {
    /// Layout with or without the Y observables.
    pub fn new(y_boxes: bool) -> Self {
        let table: &[(&str, (f64, f64))] = if y_boxes { &XYZ_BOXES } else { &XZ_BOXES };
        let boxes = table
            .iter()
            .filter_map(|(label, pos)| label.parse().ok().map(|p| (p, *pos)))
            .collect();
        Self { y_boxes, boxes }
    }

    /// Whether the Y observables are included.
    pub fn y_boxes(&self) -> bool {
        self.y_boxes
    }

    /// Center of a box.
    pub fn position(&self, pauli: &PauliString) -> Option<(f64, f64)> {
        self.boxes
            .iter()
            .find(|(p, _)| p == pauli)
            .map(|(_, pos)| *pos)
    }

    /// Whether the observable is part of the grid.
    pub fn contains(&self, pauli: &PauliString) -> bool {
        self.position(pauli).is_some()
    }

    /// Observables and positions in draw order.
    pub fn boxes(&self) -> &[(PauliString, (f64, f64))] {
        &self.boxes
    }

    /// Observables in draw order.
    pub fn paulis(&self) -> impl Iterator<Item = PauliString> + '_ {
        self.boxes.iter().map(|(p, _)| *p)
    }

    /// Non-identity single-qubit operators in play.
    pub fn operators(&self) -> Vec<Pauli> {
        if self.y_boxes {
            vec![Pauli::X, Pauli::Y, Pauli::Z]
        } else {
            vec![Pauli::X, Pauli::Z]
        }
    }

    /// Measurement bases sampled to fill the grid.
    pub fn bases(&self) -> Vec<PauliString> {
        let mut bases: Vec<PauliString> = ["ZZ", "ZX", "XZ", "XX"]
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if self.y_boxes {
            bases.extend(
                ["YY", "YX", "YZ", "XY", "ZY"]
                    .iter()
                    .filter_map(|s| s.parse::<PauliString>().ok()),
            );
        }
        bases
    }

    /// View bounds as `((x_min, x_max), (y_min, y_max))`.
    pub fn extent(&self) -> ((f64, f64), (f64, f64)) {
        if self.y_boxes {
            ((-4.0, 4.0), (0.0, 8.0))
        } else {
            ((-3.0, 3.0), (0.0, 6.0))
        }
    }
}
