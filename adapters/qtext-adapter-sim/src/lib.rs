//! qtext Local Statevector Simulator
//!
//! This crate provides the backend the puzzle grid samples from. Circuits
//! are tiny (two qubits), so every run builds the full statevector once
//! and then either reports its probabilities or samples from them.
//!
//! # Features
//!
//! - **Exact Simulation**: [`SampleMode::Exact`](qtext_hal::SampleMode)
//!   returns the ideal distribution
//! - **Measurement Sampling**: shot-based sampling with an optional fixed
//!   seed for reproducible runs
//! - **All IR Gates**: every gate of `qtext-ir`
//!
//! # Example
//!
//! ```rust
//! use qtext_adapter_sim::SimulatorBackend;
//! use qtext_hal::{Backend, SampleMode};
//! use qtext_ir::{Circuit, QubitId};
//!
//! let backend = SimulatorBackend::new();
//!
//! let mut circuit = Circuit::with_size("bell", 2);
//! circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let dist = backend.run(&circuit, SampleMode::Exact).unwrap();
//! assert!((dist.get("00") - 0.5).abs() < 1e-9);
//! assert!((dist.get("11") - 0.5).abs() < 1e-9);
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
pub use statevector::Statevector;
