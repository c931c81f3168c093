//! Drawing the Pauli grid into a [`Scene`].

use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

use crate::gates::QubitLabel;
use crate::layout::{BoxLayout, Mode};
use crate::pauli::{ExpectationMap, Pauli, PauliString};

use super::scene::{Scene, Shape, VAlign};
use super::style::{RenderConfig, Rgb};

/// Diamond side length.
const BOX_SIDE: f64 = 0.98 * SQRT_2;
const BAR_LENGTH: f64 = 0.75 * BOX_SIDE;
const BAR_WIDTH: f64 = 0.12 * BOX_SIDE;
const CIRCLE_RADIUS: f64 = 0.6;
/// Inset of the bar fill highlight.
const DELTA: f64 = 0.07;
const POINT_RADII: [f64; 2] = [0.05, 0.04];

const Z_BOX: i32 = 0;
const Z_SHAPE: i32 = 1;
const Z_POINT: i32 = 10;

/// Which observables the player may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct View {
    /// Qubits whose observables are hidden entirely.
    pub hidden: Vec<usize>,
    /// Show observables outside `{I, Z}`.
    pub qubit: bool,
    /// Show two-qubit correlation observables.
    pub corr: bool,
    /// Print the Pauli label under each box.
    pub labels: bool,
}

impl View {
    pub fn filter(&self) -> BoxFilter {
        BoxFilter {
            hidden: [self.hidden.contains(&0), self.hidden.contains(&1)],
            show_both: self.qubit,
            show_corr: self.corr,
        }
    }
}

impl Default for View {
    fn default() -> Self {
        Self {
            hidden: vec![],
            qubit: true,
            corr: true,
            labels: false,
        }
    }
}

/// Visibility filter derived from a [`View`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxFilter {
    pub hidden: [bool; 2],
    pub show_both: bool,
    pub show_corr: bool,
}

impl BoxFilter {
    /// A box is visible iff it acts trivially on every hidden qubit, uses
    /// only `I`/`Z` when `show_both` is off, and is not a correlation when
    /// `show_corr` is off.
    pub fn is_visible(&self, pauli: PauliString) -> bool {
        let unhidden = (0..2).all(|j| !self.hidden[j] || pauli.on(j) == Pauli::I);
        let basis_ok = self.show_both || pauli.is_classical();
        let corr_ok = self.show_corr || !pauli.is_correlation();
        unhidden && basis_ok && corr_ok
    }
}

/// Orientation of a bar indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bar {
    Horizontal,
    Vertical,
    Diagonal,
}

/// Everything needed to draw one frame of the grid.
pub struct GridPainter<'a> {
    pub layout: &'a BoxLayout,
    pub rho: &'a ExpectationMap,
    pub mode: Mode,
    pub view: &'a View,
    /// Qubit whose Bloch marker is drawn, line modes only.
    pub bloch: Option<QubitLabel>,
    pub message: &'a str,
    pub config: &'a RenderConfig,
}

impl GridPainter<'_> {
    /// Draw the full frame.
    pub fn paint(&self) -> Scene {
        let (x_range, y_range) = self.layout.extent();
        let mut scene = Scene::new(x_range, y_range, self.config.background, self.config.scale);

        self.draw_boxes(&mut scene);
        self.draw_circles(&mut scene);
        if self.mode.draws_lines() {
            match self.bloch {
                Some(qubit) => self.draw_bloch_lines(&mut scene, qubit),
                None => self.draw_plain_lines(&mut scene),
            }
        }
        if self.view.labels {
            self.draw_labels(&mut scene);
        }
        scene.push(Shape::Text {
            position: (-3.0, 1.0),
            content: self.message.to_string(),
            size: 10.0,
            color: self.config.text_color,
            valign: VAlign::Top,
        });
        scene
    }

    fn visible(&self, pauli: PauliString) -> bool {
        self.view.filter().is_visible(pauli) && self.rho.contains(&pauli)
    }

    fn prob_one(&self, pauli: PauliString) -> f64 {
        (1.0 - self.rho.get(&pauli).unwrap_or(0.0)) / 2.0
    }

    fn draw_boxes(&self, scene: &mut Scene) {
        for (pauli, (x, y)) in self.layout.boxes() {
            let color = if pauli.is_correlation() {
                self.config.box_color[1]
            } else {
                self.config.box_color[0]
            };
            scene.push(Shape::Rect {
                anchor: (*x, *y - 1.0),
                width: BOX_SIDE,
                height: BOX_SIDE,
                angle: 45.0,
                color,
                z: Z_BOX,
            });
        }
    }

    fn draw_circles(&self, scene: &mut Scene) {
        for (pauli, center) in self.layout.boxes() {
            if !self.visible(*pauli) {
                continue;
            }
            let color = if self.mode.draws_lines() {
                self.config.circle_color[usize::from(pauli.has_y())]
            } else {
                Rgb::gray(self.prob_one(*pauli))
            };
            scene.push(Shape::Circle {
                center: *center,
                radius: CIRCLE_RADIUS,
                color,
                z: Z_SHAPE,
            });
        }
    }

    fn draw_plain_lines(&self, scene: &mut Scene) {
        for pauli in self.layout.paulis() {
            let bar = match pauli.paulis() {
                [Pauli::Z, Pauli::I] | [Pauli::I, Pauli::Z] | [Pauli::Z, Pauli::Z] => Bar::Vertical,
                [Pauli::X, Pauli::I] | [Pauli::I, Pauli::X] | [Pauli::X, Pauli::X] => Bar::Horizontal,
                _ => Bar::Diagonal,
            };
            self.add_line(scene, bar, pauli, pauli);
        }
    }

    fn draw_bloch_lines(&self, scene: &mut Scene, qubit: QubitLabel) {
        let b = qubit.index();
        for other in [Pauli::I, Pauli::X, Pauli::Z] {
            let px = PauliString::pair(b, Pauli::X, other);
            let pz = PauliString::pair(b, Pauli::Z, other);
            let prob_z = self.add_line(scene, Bar::Vertical, pz, pz);
            let prob_x = self.add_line(scene, Bar::Horizontal, pz, px);

            if self.visible(pz) {
                if let Some((x, y)) = self.layout.position(&pz) {
                    let center = (
                        x - (prob_x - 0.5) * BAR_LENGTH,
                        y - (prob_z - 0.5) * BAR_LENGTH,
                    );
                    for (radius, color) in POINT_RADII.iter().zip(self.config.point_color) {
                        scene.push(Shape::Circle {
                            center,
                            radius: *radius,
                            color,
                            z: Z_POINT,
                        });
                    }
                }
            }
        }

        let partner = qubit.partner().index();
        let pz = PauliString::single(partner, Pauli::Z);
        let px = PauliString::single(partner, Pauli::X);
        self.add_line(scene, Bar::Vertical, pz, pz);
        self.add_line(scene, Bar::Horizontal, px, px);

        if self.layout.y_boxes() {
            for pauli in self.layout.paulis().filter(PauliString::has_y) {
                self.add_line(scene, Bar::Diagonal, pauli, pauli);
            }
        }
    }

    /// Draw a bar for `pauli` inside the box of `at`; returns `P(1)` for
    /// `pauli` whether or not the bar is visible.
    fn add_line(&self, scene: &mut Scene, bar: Bar, at: PauliString, pauli: PauliString) -> f64 {
        let p = self.prob_one(pauli);
        let Some((x, y)) = self.layout.position(&at) else {
            return p;
        };
        if !self.visible(pauli) {
            return p;
        }

        let lerp = |a: (f64, f64), c: (f64, f64)| (p * a.0 + (1.0 - p) * c.0, p * a.1 + (1.0 - p) * c.1);
        let [track, inset, fill] = self.config.line_color;
        let mut rect = |anchor: (f64, f64), width: f64, height: f64, angle: f64, color| {
            scene.push(Shape::Rect {
                anchor,
                width,
                height,
                angle,
                color,
                z: Z_SHAPE + 1,
            });
        };

        match bar {
            Bar::Horizontal => {
                let a = (x - BAR_LENGTH / 2.0, y - BAR_WIDTH / 2.0);
                let c = (x + BAR_LENGTH / 2.0, y - BAR_WIDTH / 2.0);
                let b = lerp(a, c);
                rect(a, BAR_LENGTH * (1.0 - p), BAR_WIDTH, 0.0, track);
                rect(b, BAR_LENGTH * p, BAR_WIDTH, 0.0, fill);
                if BAR_LENGTH * p > DELTA {
                    rect(
                        (b.0 + DELTA / 2.0, b.1 + DELTA * 0.6),
                        BAR_LENGTH * p - DELTA,
                        BAR_WIDTH - DELTA,
                        0.0,
                        inset,
                    );
                }
            }
            Bar::Vertical => {
                let a = (x - BAR_WIDTH / 2.0, y - BAR_LENGTH / 2.0);
                let c = (x - BAR_WIDTH / 2.0, y + BAR_LENGTH / 2.0);
                let b = lerp(a, c);
                rect(a, BAR_WIDTH, BAR_LENGTH * (1.0 - p), 0.0, track);
                rect(b, BAR_WIDTH, BAR_LENGTH * p, 0.0, fill);
                if BAR_LENGTH * p > DELTA {
                    rect(
                        (b.0 + DELTA / 2.0, b.1 + DELTA / 2.0),
                        BAR_WIDTH - DELTA,
                        BAR_LENGTH * p - DELTA,
                        0.0,
                        inset,
                    );
                }
            }
            Bar::Diagonal => {
                let s = BAR_LENGTH / (2.0 * SQRT_2);
                let a = (x - s, y - s);
                let c = (x + s, y + s);
                let b = lerp(a, c);
                rect(a, BAR_WIDTH, BAR_LENGTH * (1.0 - p), -45.0, track);
                rect(b, BAR_WIDTH, BAR_LENGTH * p, -45.0, fill);
                if BAR_LENGTH * p > DELTA {
                    rect(
                        (b.0 + DELTA * SQRT_2 / 2.0, b.1 + DELTA * 0.1 * SQRT_2 / 2.0),
                        BAR_WIDTH - DELTA,
                        BAR_LENGTH * p - DELTA,
                        -45.0,
                        inset,
                    );
                }
            }
        }
        p
    }

    /// Labels go on every background box, hidden or not.
    fn draw_labels(&self, scene: &mut Scene) {
        for (pauli, (x, y)) in self.layout.boxes() {
            scene.push(Shape::Text {
                position: (x - 0.18, y - 0.85),
                content: pauli.to_string(),
                size: 10.0,
                color: self.config.text_color,
                valign: VAlign::Baseline,
            });
        }
    }
}
