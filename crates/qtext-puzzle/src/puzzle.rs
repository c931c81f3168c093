//! The puzzle state machine.
//!
//! A player drives the puzzle with three events: choose a gate, choose a
//! qubit for it, confirm. Each event returns the choices now on offer.
//! Once the success condition holds the puzzle freezes and every further
//! event fails with [`PuzzleError::Solved`].

use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, info};

use qtext_hal::Backend;
use qtext_ir::Circuit;

use crate::config::{AllowedGates, PuzzleConfig};
use crate::error::{PuzzleError, PuzzleResult};
use crate::gates::{GateName, GateOp, QubitLabel, QubitNames, QubitTarget};
use crate::grid::PauliGrid;
use crate::pauli::{ExpectationMap, PauliString};
use crate::render::{Scene, View};

/// Qubit choice for symmetric operations.
pub const NOT_REQUIRED: &str = "not required";
/// The single action offered once a qubit is chosen.
pub const APPLY: &str = "Apply operation";
/// Every option after the puzzle is solved.
pub const SUCCESS: &str = "Success!";

/// Menu order for the well-known gates; anything else follows sorted.
const MENU_ORDER: [&str; 7] = ["bloch", "x", "y", "z", "h", "cz", "cx"];

/// Player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ChooseGate(String),
    ChooseQubit(String),
    Confirm,
}

/// Options currently offered to the player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Choices {
    pub gates: Vec<String>,
    pub qubits: Vec<String>,
    pub actions: Vec<String>,
}

impl Choices {
    fn solved() -> Self {
        Self {
            gates: vec![SUCCESS.into()],
            qubits: vec![SUCCESS.into()],
            actions: vec![SUCCESS.into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    GateChosen { gate: String },
    Ready { gate: String, target: QubitTarget },
    Solved,
}

/// Check expectation targets within `eps` and that every required
/// counter has reached zero.
pub fn check_success(
    rho: &ExpectationMap,
    targets: &BTreeMap<PauliString, f64>,
    eps: f64,
    required: &AllowedGates,
) -> bool {
    let on_target = targets
        .iter()
        .all(|(pauli, target)| rho.get(pauli).is_some_and(|value| (target - value).abs() < eps));
    on_target && required.all_zero()
}

/// A running puzzle.
pub struct Puzzle {
    name: Option<String>,
    grid: PauliGrid,
    allowed: AllowedGates,
    required: AllowedGates,
    success_condition: BTreeMap<PauliString, f64>,
    eps: f64,
    view: View,
    names: QubitNames,
    initializer: Vec<GateOp>,
    program: Vec<GateOp>,
    bloch: Option<QubitTarget>,
    menu: Vec<String>,
    phase: Phase,
}

impl Puzzle {
    /// Set up the starting state described by `config`.
    pub fn new(config: PuzzleConfig, backend: Box<dyn Backend>) -> PuzzleResult<Self> {
        config.validate()?;
        let initializer = config.initializer_ops()?;

        let mut grid = PauliGrid::new(backend, config.sample_mode(), config.mode);
        grid.apply_initializer(&initializer)?;

        let menu = gate_menu(&config.allowed_gates);
        info!(
            "Loaded puzzle {} with {} gate(s) on offer",
            config.name.as_deref().unwrap_or("(unnamed)"),
            menu.len()
        );

        Ok(Self {
            name: config.name,
            grid,
            required: config.allowed_gates.clone(),
            allowed: config.allowed_gates,
            success_condition: config.success_condition,
            eps: config.eps,
            view: config.view,
            names: config.qubit_names,
            initializer,
            program: vec![],
            bloch: None,
            menu,
            phase: Phase::Idle,
        })
    }

    /// Parse a YAML definition and set it up.
    pub fn from_yaml(source: &str, backend: Box<dyn Backend>) -> PuzzleResult<Self> {
        Self::new(PuzzleConfig::from_yaml(source)?, backend)
    }

    /// Process one player event.
    pub fn handle(&mut self, event: Event) -> PuzzleResult<Choices> {
        if self.phase == Phase::Solved {
            return Err(PuzzleError::Solved);
        }
        match event {
            Event::ChooseGate(gate) => self.choose_gate(gate),
            Event::ChooseQubit(qubit) => self.choose_qubit(&qubit),
            Event::Confirm => self.confirm(),
        }
    }

    fn choose_gate(&mut self, gate: String) -> PuzzleResult<Choices> {
        if !self.menu.contains(&gate) {
            return Err(PuzzleError::GateNotAllowed(gate));
        }
        let qubits = self.qubit_options(&gate);
        debug!("gate {gate} chosen, qubits on offer: {qubits:?}");
        self.phase = Phase::GateChosen { gate };
        Ok(Choices {
            gates: self.menu.clone(),
            qubits,
            actions: vec![],
        })
    }

    fn choose_qubit(&mut self, qubit: &str) -> PuzzleResult<Choices> {
        let gate = match &self.phase {
            Phase::GateChosen { gate } | Phase::Ready { gate, .. } => gate.clone(),
            _ => return Err(PuzzleError::NoGateChosen),
        };
        let options = self.qubit_options(&gate);
        if !options.iter().any(|q| q == qubit) {
            return Err(PuzzleError::QubitNotAllowed {
                gate,
                qubit: qubit.to_string(),
            });
        }
        let target = if qubit == NOT_REQUIRED {
            QubitTarget::Both
        } else {
            self.names
                .lookup(qubit)
                .map(QubitTarget::from)
                .ok_or_else(|| PuzzleError::UnknownQubit(qubit.to_string()))?
        };
        self.phase = Phase::Ready { gate, target };
        Ok(Choices {
            gates: self.menu.clone(),
            qubits: options,
            actions: vec![APPLY.into()],
        })
    }

    fn confirm(&mut self) -> PuzzleResult<Choices> {
        let (gate, target) = match &self.phase {
            Phase::Ready { gate, target } => (gate.clone(), *target),
            Phase::GateChosen { .. } => return Err(PuzzleError::NoQubitChosen),
            _ => return Err(PuzzleError::NoGateChosen),
        };

        match GateName::from_str(&gate)?.resolve(target) {
            None => {
                self.bloch = if self.bloch == Some(target) {
                    None
                } else {
                    Some(target)
                };
                debug!("bloch marker now on {:?}", self.bloch);
            }
            Some(op) => {
                self.grid.apply(&op)?;
                debug!("applied {}", op.listing(&self.names));
                self.program.push(op);
            }
        }

        if let Some(left) = self.required.decrement(target, &gate) {
            debug!("{gate} on {target}: {left} required use(s) left");
        }

        if self.check_success() {
            info!("Puzzle solved in {} operation(s)", self.program.len());
            self.phase = Phase::Solved;
            return Ok(Choices::solved());
        }

        self.phase = Phase::Idle;
        Ok(self.choices())
    }

    /// Qubit choices for a gate: the sentinel for symmetric gates,
    /// otherwise the names of qubit `1` then `0` that allow it.
    fn qubit_options(&self, gate: &str) -> Vec<String> {
        if self.allowed.contains(QubitTarget::Both, gate) {
            return vec![NOT_REQUIRED.into()];
        }
        [QubitLabel::One, QubitLabel::Zero]
            .into_iter()
            .filter(|q| self.allowed.contains(QubitTarget::from(*q), gate))
            .map(|q| self.names.name(q).to_string())
            .collect()
    }

    /// Options on offer in the current phase.
    pub fn choices(&self) -> Choices {
        match &self.phase {
            Phase::Idle => Choices {
                gates: self.menu.clone(),
                ..Choices::default()
            },
            Phase::GateChosen { gate } => Choices {
                gates: self.menu.clone(),
                qubits: self.qubit_options(gate),
                actions: vec![],
            },
            Phase::Ready { gate, .. } => Choices {
                gates: self.menu.clone(),
                qubits: self.qubit_options(gate),
                actions: vec![APPLY.into()],
            },
            Phase::Solved => Choices::solved(),
        }
    }

    /// Whether the targets are met and every required gate has been used.
    pub fn check_success(&self) -> bool {
        check_success(
            self.grid.expectations(),
            &self.success_condition,
            self.eps,
            &self.required,
        )
    }

    pub fn is_solved(&self) -> bool {
        self.phase == Phase::Solved
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Remaining required uses per target and gate.
    pub fn required_gates(&self) -> &AllowedGates {
        &self.required
    }

    pub fn expectations(&self) -> &ExpectationMap {
        self.grid.expectations()
    }

    pub fn grid(&self) -> &PauliGrid {
        &self.grid
    }

    /// Qubit whose Bloch marker is shown.
    pub fn bloch(&self) -> Option<QubitLabel> {
        self.bloch.and_then(QubitTarget::label)
    }

    /// "qubit" for qubit puzzles, "bit" for bit puzzles.
    pub fn qubit_word(&self) -> &'static str {
        if self.view.qubit { "qubit" } else { "bit" }
    }

    /// Operations applied by the player.
    pub fn program(&self) -> &[GateOp] {
        &self.program
    }

    /// The player's program, one line per operation.
    pub fn program_listing(&self) -> Vec<String> {
        self.program
            .iter()
            .map(|op| op.listing(&self.names))
            .collect()
    }

    /// Rebuild the player's circuit, optionally prefixed by the initializer.
    pub fn circuit(&self, use_initializer: bool) -> PuzzleResult<Circuit> {
        let mut circuit = Circuit::with_size("puzzle", 2);
        if use_initializer {
            for op in &self.initializer {
                op.apply_to(&mut circuit)?;
            }
        }
        for op in &self.program {
            op.apply_to(&mut circuit)?;
        }
        Ok(circuit)
    }

    /// Text block listing the gates still on offer.
    pub fn gate_list_message(&self) -> String {
        let mut message = String::new();
        for target in QubitTarget::ALL {
            let Some(gates) = self.allowed.get(target) else {
                continue;
            };
            let mut gate_list = String::new();
            for (gate, allowed) in gates {
                let left = self.required.count(target, gate).unwrap_or(0);
                if left > 0 {
                    let plural = if left > 1 { "s" } else { "" };
                    gate_list.push_str(&format!("  {gate} (use {left} time{plural})"));
                } else if *allowed == 0 {
                    gate_list.push_str(&format!("  {gate} "));
                }
            }
            if gate_list.is_empty() {
                continue;
            }
            match target.label() {
                None => message.push_str("\nAllowed symmetric operations:"),
                Some(q) => {
                    message.push_str("\nAllowed operations for ");
                    message.push_str(self.names.name(q));
                    message.push_str(":\n");
                    message.push_str(&" ".repeat(10));
                }
            }
            message.push_str(&gate_list);
            message.push('\n');
        }
        message
    }

    /// Draw the grid with the gate list underneath.
    pub fn render(&self) -> Scene {
        self.grid
            .render(&self.view, self.bloch(), &self.gate_list_message())
    }
}

/// `bloch` first, then the common gates, then everything else sorted.
fn gate_menu(allowed: &AllowedGates) -> Vec<String> {
    let labels = allowed.labels();
    let mut menu: Vec<String> = MENU_ORDER
        .iter()
        .filter(|g| labels.contains(*g))
        .map(|g| g.to_string())
        .collect();
    for label in labels {
        if !MENU_ORDER.contains(&label) {
            menu.push(label.to_string());
        }
    }
    menu
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtext_adapter_sim::SimulatorBackend;

    fn puzzle(yaml: &str) -> Puzzle {
        Puzzle::from_yaml(yaml, Box::new(SimulatorBackend::new())).unwrap()
    }

    const FLIP: &str = r#"
name: flip
exact: true
initialize: []
success_condition: {ZI: -1.0}
allowed_gates:
  0: {x: 1}
  1: {}
  both: {}
"#;

    #[test]
    fn test_gate_menu_order() {
        let mut allowed = AllowedGates::default();
        for g in ["swap", "cx", "h", "bloch", "ry(pi/4)", "x"] {
            allowed.insert(QubitTarget::Zero, g, 0);
        }
        assert_eq!(
            gate_menu(&allowed),
            vec!["bloch", "x", "h", "cx", "ry(pi/4)", "swap"]
        );
    }

    #[test]
    fn test_solve_single_flip() {
        let mut p = puzzle(FLIP);
        assert_eq!(p.choices().gates, vec!["x"]);

        let choices = p.handle(Event::ChooseGate("x".into())).unwrap();
        assert_eq!(choices.qubits, vec!["q[0]"]);

        let choices = p.handle(Event::ChooseQubit("q[0]".into())).unwrap();
        assert_eq!(choices.actions, vec![APPLY]);

        let choices = p.handle(Event::Confirm).unwrap();
        assert_eq!(choices, Choices::solved());
        assert!(p.is_solved());
        assert_eq!(p.program_listing(), vec!["qc.x(q[0])"]);
    }

    #[test]
    fn test_frozen_after_success() {
        let mut p = puzzle(FLIP);
        p.handle(Event::ChooseGate("x".into())).unwrap();
        p.handle(Event::ChooseQubit("q[0]".into())).unwrap();
        p.handle(Event::Confirm).unwrap();

        let before = p.expectations().clone();
        assert!(matches!(
            p.handle(Event::ChooseGate("x".into())),
            Err(PuzzleError::Solved)
        ));
        assert!(matches!(p.handle(Event::Confirm), Err(PuzzleError::Solved)));
        assert_eq!(p.expectations(), &before);
        assert_eq!(p.program().len(), 1);
    }

    #[test]
    fn test_targets_met_but_gates_unused() {
        let yaml = r#"
exact: true
success_condition: {ZI: 1.0}
allowed_gates:
  0: {x: 2}
"#;
        let mut p = puzzle(yaml);
        assert!(!p.check_success());
        for _ in 0..2 {
            p.handle(Event::ChooseGate("x".into())).unwrap();
            p.handle(Event::ChooseQubit("q[0]".into())).unwrap();
            p.handle(Event::Confirm).unwrap();
        }
        assert!(p.is_solved());
    }

    #[test]
    fn test_symmetric_gate_uses_sentinel() {
        let yaml = r#"
exact: true
initialize: [[h, 0], [h, 1]]
success_condition: {XX: 1.0, ZZ: 0.0}
allowed_gates:
  0: {}
  1: {}
  both: {cz: 0}
"#;
        let mut p = puzzle(yaml);
        let choices = p.handle(Event::ChooseGate("cz".into())).unwrap();
        assert_eq!(choices.qubits, vec![NOT_REQUIRED]);
        p.handle(Event::ChooseQubit(NOT_REQUIRED.into())).unwrap();
        p.handle(Event::Confirm).unwrap();
        assert_eq!(p.program_listing(), vec!["qc.cz(q[0], q[1])"]);
    }

    #[test]
    fn test_qubit_options_order_and_names() {
        let yaml = r#"
allowed_gates:
  0: {NOT: 0}
  1: {NOT: 0}
qubit_names: {"0": "right", "1": "left"}
view: {qubit: false}
"#;
        let mut p = puzzle(yaml);
        let choices = p.handle(Event::ChooseGate("NOT".into())).unwrap();
        assert_eq!(choices.qubits, vec!["left", "right"]);
        assert_eq!(p.qubit_word(), "bit");

        assert!(matches!(
            p.handle(Event::ChooseQubit("middle".into())),
            Err(PuzzleError::QubitNotAllowed { .. })
        ));
    }

    #[test]
    fn test_event_order_errors() {
        let mut p = puzzle(FLIP);
        assert!(matches!(
            p.handle(Event::ChooseQubit("q[0]".into())),
            Err(PuzzleError::NoGateChosen)
        ));
        p.handle(Event::ChooseGate("x".into())).unwrap();
        assert!(matches!(p.handle(Event::Confirm), Err(PuzzleError::NoQubitChosen)));
        assert!(matches!(
            p.handle(Event::ChooseGate("h".into())),
            Err(PuzzleError::GateNotAllowed(_))
        ));
    }

    #[test]
    fn test_bloch_toggle() {
        let yaml = r#"
exact: true
success_condition: {ZI: -1.0}
allowed_gates:
  0: {bloch: 0, x: 0}
  1: {}
"#;
        let mut p = puzzle(yaml);
        for _ in 0..2 {
            p.handle(Event::ChooseGate("bloch".into())).unwrap();
            p.handle(Event::ChooseQubit("q[0]".into())).unwrap();
            p.handle(Event::Confirm).unwrap();
        }
        assert_eq!(p.bloch(), None);

        p.handle(Event::ChooseGate("bloch".into())).unwrap();
        p.handle(Event::ChooseQubit("q[0]".into())).unwrap();
        p.handle(Event::Confirm).unwrap();
        assert_eq!(p.bloch(), Some(QubitLabel::Zero));
        assert!(p.program().is_empty());
    }

    #[test]
    fn test_gate_list_message() {
        let yaml = r#"
allowed_gates:
  0: {x: 2, h: 0}
  1: {z: 1}
  both: {cz: 0}
"#;
        let p = puzzle(yaml);
        let message = p.gate_list_message();
        assert_eq!(
            message,
            "\nAllowed operations for q[0]:\n            h   x (use 2 times)\n\
             \nAllowed operations for q[1]:\n            z (use 1 time)\n\
             \nAllowed symmetric operations:  cz \n"
        );
    }

    #[test]
    fn test_circuit_with_initializer() {
        let yaml = r#"
exact: true
initialize: [[h, 0]]
success_condition: {ZZ: -1.0}
allowed_gates:
  1: {x: 0}
"#;
        let mut p = puzzle(yaml);
        p.handle(Event::ChooseGate("x".into())).unwrap();
        p.handle(Event::ChooseQubit("q[1]".into())).unwrap();
        p.handle(Event::Confirm).unwrap();

        assert_eq!(p.circuit(false).unwrap().num_ops(), 1);
        let full = p.circuit(true).unwrap();
        assert_eq!(full.num_ops(), 2);
        assert_eq!(full.instructions()[0].name(), "h");
    }

    #[test]
    fn test_render_includes_message() {
        let p = puzzle(FLIP);
        let scene = p.render();
        assert!(scene.texts().any(|t| t.contains("x (use 1 time)")));
    }
}
