//! Backend trait and configuration.
//!
//! A backend is a synchronous sampler: callers submit a circuit and block
//! until the distribution is available.
//!
//! | Method | Required | Returns |
//! |--------|----------|---------|
//! | `name()` | yes | `&str` |
//! | `max_qubits()` | yes | `u32` |
//! | `run()` | yes | `HalResult<Distribution>` |
//! | `validate()` | provided | `HalResult<()>` |

use serde::{Deserialize, Serialize};

use qtext_ir::Circuit;

use crate::error::{HalError, HalResult};
use crate::result::{Distribution, SampleMode};

/// Configuration for a backend instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Seed for stochastic sampling; `None` draws from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seed: None,
        }
    }

    /// Fix the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Trait for sampling backends.
///
/// # Contract
///
/// - `run()` MUST NOT mutate the circuit it is given.
/// - The returned distribution sums to one (up to rounding).
/// - `SampleMode::Shots(0)` MUST be rejected with [`HalError::InvalidShots`].
pub trait Backend {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Largest circuit this backend accepts.
    fn max_qubits(&self) -> u32;

    /// Execute the circuit and return its outcome distribution.
    fn run(&self, circuit: &Circuit, mode: SampleMode) -> HalResult<Distribution>;

    /// Check the circuit and mode against backend limits.
    fn validate(&self, circuit: &Circuit, mode: SampleMode) -> HalResult<()> {
        if circuit.num_qubits() > self.max_qubits() as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but {} only supports {}",
                circuit.num_qubits(),
                self.name(),
                self.max_qubits()
            )));
        }
        if mode == SampleMode::Shots(0) {
            return Err(HalError::InvalidShots(
                "shot count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn max_qubits(&self) -> u32 {
        (**self).max_qubits()
    }

    fn run(&self, circuit: &Circuit, mode: SampleMode) -> HalResult<Distribution> {
        (**self).run(circuit, mode)
    }

    fn validate(&self, circuit: &Circuit, mode: SampleMode) -> HalResult<()> {
        (**self).validate(circuit, mode)
    }
}
