//! qtext Puzzle Grid
//!
//! Two-qubit puzzles in the style of "Hello Quantum". The state of a pair
//! of qubits is shown as a grid of Pauli observables; the player applies
//! gates until the observables reach a target.
//!
//! # Example: Solving a One-Move Puzzle
//!
//! ```rust
//! use qtext_adapter_sim::SimulatorBackend;
//! use qtext_puzzle::{Event, Puzzle};
//!
//! let yaml = r#"
//! exact: true
//! success_condition: {ZI: -1.0}
//! allowed_gates:
//!   0: {x: 1}
//! "#;
//!
//! let mut puzzle = Puzzle::from_yaml(yaml, Box::new(SimulatorBackend::new())).unwrap();
//! puzzle.handle(Event::ChooseGate("x".into())).unwrap();
//! puzzle.handle(Event::ChooseQubit("q[0]".into())).unwrap();
//! puzzle.handle(Event::Confirm).unwrap();
//!
//! assert!(puzzle.is_solved());
//! let svg = puzzle.render().to_svg();
//! assert!(svg.starts_with("<svg"));
//! ```
//!
//! # Modes
//!
//! | Mode | Observables | Drawing |
//! |------|-------------|---------|
//! | `circle` | `I`, `X`, `Z` | gray circles |
//! | `line` | `I`, `X`, `Z` | bars with optional Bloch marker |
//! | `y` | `I`, `X`, `Y`, `Z` | bars |

pub mod config;
pub mod error;
pub mod gates;
pub mod grid;
pub mod layout;
pub mod pauli;
pub mod puzzle;
pub mod render;

pub use config::{AllowedGates, PuzzleConfig};
pub use error::{PuzzleError, PuzzleResult};
pub use gates::{GateName, GateOp, QubitLabel, QubitNames, QubitTarget};
pub use grid::PauliGrid;
pub use layout::{BoxLayout, Mode};
pub use pauli::{ExpectationMap, Pauli, PauliString};
pub use puzzle::{APPLY, Choices, Event, NOT_REQUIRED, Puzzle, SUCCESS, check_success};
pub use render::{BoxFilter, RenderConfig, Rgb, Scene, Shape, View};
