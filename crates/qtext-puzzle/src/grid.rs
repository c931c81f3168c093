//! The Pauli grid: a two-qubit circuit and the expectation values drawn
//! from it.

use std::collections::BTreeMap;
use tracing::{debug, instrument};

use qtext_hal::{Backend, Distribution, SampleMode};
use qtext_ir::{Circuit, QubitId};

use crate::error::PuzzleResult;
use crate::gates::{GateOp, QubitLabel};
use crate::layout::{BoxLayout, Mode};
use crate::pauli::{ExpectationMap, Pauli, PauliString};
use crate::render::{GridPainter, RenderConfig, Scene, View};

/// A two-qubit circuit together with its Pauli expectation values.
pub struct PauliGrid {
    circuit: Circuit,
    backend: Box<dyn Backend>,
    sample_mode: SampleMode,
    mode: Mode,
    layout: BoxLayout,
    rho: ExpectationMap,
    render_config: RenderConfig,
}

impl PauliGrid {
    /// Grid in |00⟩ sampled through `backend`.
    pub fn new(backend: Box<dyn Backend>, sample_mode: SampleMode, mode: Mode) -> Self {
        let layout = BoxLayout::new(mode.y_boxes());
        let rho = ExpectationMap::initial(layout.paulis());
        Self {
            circuit: Circuit::with_size("grid", 2),
            backend,
            sample_mode,
            mode,
            layout,
            rho,
            render_config: RenderConfig::default(),
        }
    }

    /// Replace the colour palette.
    #[must_use]
    pub fn with_render_config(mut self, config: RenderConfig) -> Self {
        self.render_config = config;
        self
    }

    /// Apply a list of operations and refresh the expectation values.
    /// Nothing changes if any operation or the sampling fails.
    pub fn apply_initializer(&mut self, ops: &[GateOp]) -> PuzzleResult<()> {
        let mut circuit = self.circuit.clone();
        for op in ops {
            op.apply_to(&mut circuit)?;
        }
        let rho = self.expectations_for(&circuit)?;
        self.circuit = circuit;
        self.rho = rho;
        Ok(())
    }

    /// Apply a single operation and refresh the expectation values.
    pub fn apply(&mut self, op: &GateOp) -> PuzzleResult<()> {
        self.apply_initializer(std::slice::from_ref(op))
    }

    /// Recompute expectation values for the current circuit.
    pub fn refresh(&mut self) -> PuzzleResult<&ExpectationMap> {
        self.rho = self.expectations_for(&self.circuit)?;
        Ok(&self.rho)
    }

    /// Show the given values instead of those of the circuit.
    pub fn set_expectations(&mut self, rho: ExpectationMap) {
        self.rho = rho;
    }

    /// Expectation values currently shown.
    pub fn expectations(&self) -> &ExpectationMap {
        &self.rho
    }

    /// The circuit applied so far.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn layout(&self) -> &BoxLayout {
        &self.layout
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn sample_mode(&self) -> SampleMode {
        self.sample_mode
    }

    /// Compute `⟨P⟩` for every observable of the grid by sampling `circuit`
    /// in each measurement basis.
    #[instrument(skip(self, circuit), fields(backend = self.backend.name(), mode = %self.sample_mode))]
    pub fn expectations_for(&self, circuit: &Circuit) -> PuzzleResult<ExpectationMap> {
        let operators = self.layout.operators();
        let mut results: BTreeMap<PauliString, Distribution> = BTreeMap::new();

        for basis in self.layout.bases() {
            let mut rotated = circuit.clone();
            for j in 0..2 {
                let q = QubitId(j as u32);
                match basis.on(j) {
                    Pauli::X => {
                        rotated.h(q)?;
                    }
                    Pauli::Y => {
                        rotated.sdg(q)?.h(q)?;
                    }
                    _ => {}
                }
            }
            if let SampleMode::Shots(_) = self.sample_mode {
                rotated.barrier_all()?.measure_all()?;
            }
            let dist = self.backend.run(&rotated, self.sample_mode)?;
            debug!("basis {basis}: {} outcomes", dist.len());
            results.insert(basis, dist);
        }

        let divisor = 2.0 + f64::from(u8::from(self.layout.y_boxes()));
        let mut prob: BTreeMap<PauliString, f64> = BTreeMap::new();

        for j in 0..2 {
            for &p in &operators {
                let mut acc = 0.0;
                for &partner in &operators {
                    let basis = PauliString::pair(j, p, partner);
                    if let Some(dist) = results.get(&basis) {
                        acc += dist
                            .iter()
                            .filter(|(bits, _)| bit_is_one(bits, j))
                            .map(|(_, pr)| pr / divisor)
                            .sum::<f64>();
                    }
                }
                prob.insert(PauliString::single(j, p), acc);
            }
        }

        for (basis, dist) in &results {
            let odd = dist
                .iter()
                .filter(|(bits, _)| bit_is_one(bits, 0) != bit_is_one(bits, 1))
                .map(|(_, pr)| *pr)
                .sum();
            prob.insert(*basis, odd);
        }

        Ok(prob
            .into_iter()
            .filter(|(pauli, _)| self.layout.contains(pauli))
            .map(|(pauli, p)| (pauli, 1.0 - 2.0 * p))
            .collect())
    }

    /// Draw the grid.
    pub fn render(&self, view: &View, bloch: Option<QubitLabel>, message: &str) -> Scene {
        GridPainter {
            layout: &self.layout,
            rho: &self.rho,
            mode: self.mode,
            view,
            bloch,
            message,
            config: &self.render_config,
        }
        .paint()
    }
}

fn bit_is_one(bits: &str, qubit: usize) -> bool {
    bits.as_bytes().get(qubit) == Some(&b'1')
}
