//! Property-based tests for puzzle invariants.
//!
//! Random event streams must never raise a required-gate counter, a solved
//! puzzle must stay frozen, visibility must depend only on the view, and
//! exact expectation values must stay in `[-1, 1]`.

use proptest::prelude::*;
use qtext_adapter_sim::SimulatorBackend;
use qtext_hal::SampleMode;
use qtext_puzzle::{
    AllowedGates, BoxFilter, Event, ExpectationMap, GateName, Mode, PauliGrid, PauliString,
    Puzzle, PuzzleError, QubitTarget, View,
};

const PUZZLE: &str = r#"
exact: true
success_condition: {ZI: -1.0, IZ: -1.0}
allowed_gates:
  0: {x: 2, h: 0, bloch: 0}
  1: {x: 1, cx: 1}
  both: {cz: 0}
"#;

const QUBIT_LABELS: [&str; 4] = ["q[0]", "q[1]", "not required", "q[2]"];
const GATE_LABELS: [&str; 6] = ["x", "h", "bloch", "cx", "cz", "swap"];

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (0..GATE_LABELS.len()).prop_map(|i| Event::ChooseGate(GATE_LABELS[i].to_string())),
        (0..QUBIT_LABELS.len()).prop_map(|i| Event::ChooseQubit(QUBIT_LABELS[i].to_string())),
        Just(Event::Confirm),
    ]
}

fn counters(required: &AllowedGates) -> Vec<(QubitTarget, String, u32)> {
    required
        .iter()
        .map(|(t, g, n)| (t, g.to_string(), n))
        .collect()
}

fn arb_pauli() -> impl Strategy<Value = PauliString> {
    let labels: Vec<String> = ["I", "X", "Y", "Z"]
        .iter()
        .flat_map(|a| ["I", "X", "Y", "Z"].iter().map(move |b| format!("{a}{b}")))
        .collect();
    prop::sample::select(labels).prop_map(|s| s.parse::<PauliString>().unwrap())
}

fn arb_gate_sequence() -> impl Strategy<Value = Vec<(GateName, QubitTarget)>> {
    let gates = prop::sample::select(vec![
        GateName::X,
        GateName::Y,
        GateName::Z,
        GateName::H,
        GateName::RyPlus,
        GateName::RxMinus,
        GateName::Cx,
        GateName::Cz,
        GateName::Swap,
    ]);
    let targets = prop::sample::select(vec![QubitTarget::Zero, QubitTarget::One, QubitTarget::Both]);
    prop::collection::vec((gates, targets), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Counters never increase and never underflow, whatever the player does.
    #[test]
    fn test_counters_non_increasing(events in prop::collection::vec(arb_event(), 1..40)) {
        let mut puzzle = Puzzle::from_yaml(PUZZLE, Box::new(SimulatorBackend::new())).unwrap();
        let mut previous = counters(puzzle.required_gates());

        for event in events {
            let _ = puzzle.handle(event);
            let current = counters(puzzle.required_gates());
            prop_assert_eq!(current.len(), previous.len());
            for (before, after) in previous.iter().zip(&current) {
                prop_assert_eq!(&before.0, &after.0);
                prop_assert_eq!(&before.1, &after.1);
                prop_assert!(after.2 <= before.2, "{} on {} went up", after.1, after.0);
            }
            previous = current;
        }
    }

    /// Once solved, no event changes the program, counters or values.
    #[test]
    fn test_solved_puzzle_is_frozen(events in prop::collection::vec(arb_event(), 1..20)) {
        let yaml = "exact: true\nsuccess_condition: {ZI: -1.0}\nallowed_gates:\n  0: {x: 1}\n";
        let mut puzzle = Puzzle::from_yaml(yaml, Box::new(SimulatorBackend::new())).unwrap();
        puzzle.handle(Event::ChooseGate("x".into())).unwrap();
        puzzle.handle(Event::ChooseQubit("q[0]".into())).unwrap();
        puzzle.handle(Event::Confirm).unwrap();
        prop_assert!(puzzle.is_solved());

        let rho = puzzle.expectations().clone();
        let required = counters(puzzle.required_gates());
        for event in events {
            prop_assert!(matches!(puzzle.handle(event), Err(PuzzleError::Solved)));
        }
        prop_assert_eq!(puzzle.expectations(), &rho);
        prop_assert_eq!(counters(puzzle.required_gates()), required);
        prop_assert_eq!(puzzle.program().len(), 1);
    }

    /// Visibility is a pure function of the filter flags and the Pauli.
    #[test]
    fn test_visibility_is_pure(
        hidden0 in any::<bool>(),
        hidden1 in any::<bool>(),
        show_both in any::<bool>(),
        show_corr in any::<bool>(),
        pauli in arb_pauli(),
    ) {
        let filter = BoxFilter { hidden: [hidden0, hidden1], show_both, show_corr };
        let expected = (!hidden0 || pauli.on(0) == qtext_puzzle::Pauli::I)
            && (!hidden1 || pauli.on(1) == qtext_puzzle::Pauli::I)
            && (show_both || pauli.is_classical())
            && (show_corr || !pauli.is_correlation());
        prop_assert_eq!(filter.is_visible(pauli), expected);
        prop_assert_eq!(filter.is_visible(pauli), filter.is_visible(pauli));
    }

    /// The drawn circles depend on the view, not on the values.
    #[test]
    fn test_circle_count_independent_of_values(
        hidden in prop::collection::vec(0_usize..2, 0..2),
        qubit in any::<bool>(),
        corr in any::<bool>(),
        value in -1.0_f64..=1.0,
    ) {
        let view = View { hidden, qubit, corr, labels: false };
        let mut grid = PauliGrid::new(Box::new(SimulatorBackend::new()), SampleMode::Exact, Mode::Circle);
        let zero = grid.render(&view, None, "").circles().count();

        let paulis: Vec<PauliString> = grid.layout().paulis().collect();
        grid.set_expectations(paulis.into_iter().map(|p| (p, value)).collect::<ExpectationMap>());
        let other = grid.render(&view, None, "").circles().count();
        prop_assert_eq!(zero, other);
    }

    /// Exact expectation values lie in [-1, 1] for any gate sequence.
    #[test]
    fn test_exact_values_bounded(ops in arb_gate_sequence(), y in any::<bool>()) {
        let mode = if y { Mode::Y } else { Mode::Line };
        let mut grid = PauliGrid::new(Box::new(SimulatorBackend::new()), SampleMode::Exact, mode);
        let ops: Vec<_> = ops.into_iter().filter_map(|(g, t)| g.resolve(t)).collect();
        grid.apply_initializer(&ops).unwrap();

        for (pauli, value) in grid.expectations().iter() {
            prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(value), "{pauli} = {value}");
        }
    }
}
