//! Simulator backend implementation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::time::Instant;
use tracing::{debug, instrument};

use qtext_hal::{Backend, BackendConfig, Counts, Distribution, HalResult, SampleMode};
use qtext_ir::Circuit;

use crate::statevector::Statevector;

/// Local simulator backend.
///
/// Builds the statevector once per run and either reports its
/// probabilities or draws shots from it.
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Maximum number of qubits supported.
    max_qubits: u32,
    /// Shot sampler; reseeded only at construction.
    rng: RefCell<StdRng>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::from_config(BackendConfig::new("simulator"))
    }

    /// Create a simulator whose shot sampling is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_config(BackendConfig::new("simulator").with_seed(seed))
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            max_qubits,
            ..Self::new()
        }
    }

    /// Create a simulator from a configuration.
    pub fn from_config(config: BackendConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            max_qubits: 12,
            rng: RefCell::new(rng),
        }
    }

    /// Evolve |0…0⟩ through every instruction of the circuit.
    fn final_state(circuit: &Circuit) -> Statevector {
        let mut sv = Statevector::new(circuit.num_qubits());
        for inst in circuit.instructions() {
            sv.apply(inst);
        }
        sv
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    #[instrument(skip(self, circuit), fields(qubits = circuit.num_qubits()))]
    fn run(&self, circuit: &Circuit, mode: SampleMode) -> HalResult<Distribution> {
        self.validate(circuit, mode)?;
        let start = Instant::now();

        let sv = Self::final_state(circuit);
        debug!("Circuit has {} instructions", circuit.instructions().len());

        let dist = match mode {
            SampleMode::Exact => Distribution::from_probabilities(
                sv.probabilities()
                    .into_iter()
                    .enumerate()
                    .map(|(i, p)| (sv.outcome_to_bitstring(i), p)),
            ),
            SampleMode::Shots(shots) => {
                let mut counts = Counts::new();
                let mut rng = self.rng.borrow_mut();
                for _ in 0..shots {
                    let outcome = sv.sample(&mut *rng);
                    counts.insert(sv.outcome_to_bitstring(outcome), 1);
                }
                counts.to_distribution()
            }
        };

        debug!("Simulation completed in {:?}", start.elapsed());
        Ok(dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtext_hal::HalError;
    use qtext_ir::QubitId;

    fn bell() -> Circuit {
        let mut circuit = Circuit::with_size("bell", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure_all()
            .unwrap();
        circuit
    }

    #[test]
    fn test_exact_bell_state() {
        let backend = SimulatorBackend::new();
        let dist = backend.run(&bell(), SampleMode::Exact).unwrap();
        assert!((dist.get("00") - 0.5).abs() < 1e-10);
        assert!((dist.get("11") - 0.5).abs() < 1e-10);
        assert_eq!(dist.get("01"), 0.0);
        assert_eq!(dist.len(), 2);
    }

    #[test]
    fn test_sampled_bell_state() {
        let backend = SimulatorBackend::with_seed(42);
        let dist = backend.run(&bell(), SampleMode::Shots(1000)).unwrap();

        // Bell state should produce only 00 and 11
        assert!((dist.get("00") + dist.get("11") - 1.0).abs() < 1e-12);
        assert_eq!(dist.get("01") + dist.get("10"), 0.0);
        assert!((dist.get("00") - 0.5).abs() < 0.1);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let a = SimulatorBackend::with_seed(9)
            .run(&bell(), SampleMode::Shots(256))
            .unwrap();
        let b = SimulatorBackend::with_seed(9)
            .run(&bell(), SampleMode::Shots(256))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_qubit_order_in_bitstrings() {
        let mut circuit = Circuit::with_size("x0", 2);
        circuit.x(QubitId(0)).unwrap();
        let dist = SimulatorBackend::new()
            .run(&circuit, SampleMode::Exact)
            .unwrap();
        assert_eq!(dist.get("10"), 1.0);
    }

    #[test]
    fn test_zero_shots_rejected() {
        let err = SimulatorBackend::new()
            .run(&bell(), SampleMode::Shots(0))
            .unwrap_err();
        assert!(matches!(err, HalError::InvalidShots(_)));
    }

    #[test]
    fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::with_max_qubits(1);
        let result = backend.run(&bell(), SampleMode::Exact);
        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));
    }
}
