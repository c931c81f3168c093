//! Puzzle definitions loaded from YAML.
//!
//! ```yaml
//! name: Make the bits disagree
//! initialize: [[x, 0]]
//! success_condition: {ZZ: -1.0}
//! allowed_gates:
//!   0: {x: 0}
//!   1: {x: 0}
//!   both: {}
//! view: {hidden: [], qubit: false, corr: true}
//! qubit_names: {"0": "the bit on the right", "1": "the bit on the left"}
//! mode: circle
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use qtext_hal::SampleMode;

use crate::error::{PuzzleError, PuzzleResult};
use crate::gates::{GateName, GateOp, QubitNames, QubitTarget};
use crate::layout::{BoxLayout, Mode};
use crate::pauli::PauliString;
use crate::render::View;

/// Per-target gate counts: `0` means unlimited, `n > 0` means exactly `n`
/// uses are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowedGates(BTreeMap<QubitTarget, BTreeMap<String, u32>>);

impl AllowedGates {
    /// Gates listed for a target.
    pub fn get(&self, target: QubitTarget) -> Option<&BTreeMap<String, u32>> {
        self.0.get(&target)
    }

    /// Count for a gate on a target.
    pub fn count(&self, target: QubitTarget, gate: &str) -> Option<u32> {
        self.0.get(&target).and_then(|gates| gates.get(gate)).copied()
    }

    /// Whether `gate` is listed for `target`.
    pub fn contains(&self, target: QubitTarget, gate: &str) -> bool {
        self.count(target, gate).is_some()
    }

    /// Set the count for a gate on a target.
    pub fn insert(&mut self, target: QubitTarget, gate: impl Into<String>, count: u32) {
        self.0.entry(target).or_default().insert(gate.into(), count);
    }

    /// Decrement a positive counter; returns the new value.
    pub fn decrement(&mut self, target: QubitTarget, gate: &str) -> Option<u32> {
        let count = self.0.get_mut(&target)?.get_mut(gate)?;
        if *count > 0 {
            *count -= 1;
        }
        Some(*count)
    }

    /// Every gate label across all targets, deduplicated.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self
            .0
            .values()
            .flat_map(|gates| gates.keys().map(String::as_str))
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// Whether every counter has reached zero.
    pub fn all_zero(&self) -> bool {
        self.0.values().flat_map(BTreeMap::values).all(|n| *n == 0)
    }

    /// Iterate over `(target, gate, count)`.
    pub fn iter(&self) -> impl Iterator<Item = (QubitTarget, &str, u32)> + '_ {
        self.0
            .iter()
            .flat_map(|(t, gates)| gates.iter().map(move |(g, n)| (*t, g.as_str(), *n)))
    }
}

/// A complete puzzle definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Title shown by the CLI.
    #[serde(default)]
    pub name: Option<String>,
    /// Gates applied to |00⟩ to reach the starting state.
    #[serde(default)]
    pub initialize: Vec<(String, QubitTarget)>,
    /// Target expectation values.
    #[serde(default)]
    pub success_condition: BTreeMap<PauliString, f64>,
    #[serde(default)]
    pub allowed_gates: AllowedGates,
    #[serde(default)]
    pub view: View,
    #[serde(default)]
    pub qubit_names: QubitNames,
    /// Tolerance for the success condition.
    #[serde(default = "default_eps")]
    pub eps: f64,
    /// Shots per measurement basis; `null` selects exact probabilities.
    #[serde(default = "default_shots")]
    pub shots: Option<u32>,
    /// Use exact probabilities regardless of `shots`.
    #[serde(default)]
    pub exact: bool,
    #[serde(default)]
    pub mode: Mode,
    /// Seed for shot sampling.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_eps() -> f64 {
    0.1
}

fn default_shots() -> Option<u32> {
    Some(1024)
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            name: None,
            initialize: vec![],
            success_condition: BTreeMap::new(),
            allowed_gates: AllowedGates::default(),
            view: View::default(),
            qubit_names: QubitNames::default(),
            eps: default_eps(),
            shots: default_shots(),
            exact: false,
            mode: Mode::default(),
            seed: None,
        }
    }
}

impl PuzzleConfig {
    /// Parse and check a YAML definition.
    pub fn from_yaml(source: &str) -> PuzzleResult<Self> {
        let config: Self = serde_yaml_ng::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// How the backend should produce distributions.
    pub fn sample_mode(&self) -> SampleMode {
        match self.shots {
            Some(shots) if !self.exact => SampleMode::Shots(shots),
            _ => SampleMode::Exact,
        }
    }

    /// Resolve the initializer into operations.
    pub fn initializer_ops(&self) -> PuzzleResult<Vec<GateOp>> {
        self.initialize
            .iter()
            .map(|(gate, target)| {
                GateName::from_str(gate)?.resolve(*target).ok_or_else(|| {
                    PuzzleError::InvalidConfig(format!("'{gate}' cannot be used in an initializer"))
                })
            })
            .collect()
    }

    /// Check the definition for consistency.
    pub fn validate(&self) -> PuzzleResult<()> {
        for (_, gate, _) in self.allowed_gates.iter() {
            GateName::from_str(gate)?;
        }
        self.initializer_ops()?;

        let layout = BoxLayout::new(self.mode.y_boxes());
        for pauli in self.success_condition.keys() {
            if !layout.contains(pauli) {
                return Err(PuzzleError::UnknownObservable(pauli.to_string()));
            }
        }

        if let Some(q) = self.view.hidden.iter().find(|q| **q > 1) {
            return Err(PuzzleError::UnknownQubit(q.to_string()));
        }
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(PuzzleError::InvalidConfig(format!(
                "eps must be a positive number, got {}",
                self.eps
            )));
        }
        if self.sample_mode() == SampleMode::Shots(0) {
            return Err(PuzzleError::InvalidConfig("shots must be at least 1".into()));
        }
        if self.qubit_names.zero == self.qubit_names.one {
            return Err(PuzzleError::InvalidConfig(
                "the two qubits need distinct names".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIT_PUZZLE: &str = r#"
initialize: [[x, 0]]
success_condition: {ZI: 1.0}
allowed_gates:
  0: {NOT: 0}
  1: {}
  both: {}
view: {hidden: [1], qubit: false, corr: false}
qubit_names: {"0": "the only bit", "1": "the other bit"}
mode: circle
"#;

    #[test]
    fn test_parse_bit_puzzle() {
        let config = PuzzleConfig::from_yaml(BIT_PUZZLE).unwrap();
        assert_eq!(config.initialize, vec![("x".to_string(), QubitTarget::Zero)]);
        assert_eq!(config.allowed_gates.count(QubitTarget::Zero, "NOT"), Some(0));
        assert_eq!(config.view.hidden, vec![1]);
        assert!(!config.view.qubit);
        assert_eq!(config.qubit_names.zero, "the only bit");
        assert_eq!(config.mode, Mode::Circle);
        assert_eq!(config.eps, 0.1);
        assert_eq!(config.sample_mode(), SampleMode::Shots(1024));
    }

    #[test]
    fn test_exact_selection() {
        let config = PuzzleConfig::from_yaml("shots: null").unwrap();
        assert_eq!(config.sample_mode(), SampleMode::Exact);
        let config = PuzzleConfig::from_yaml("exact: true\nshots: 10").unwrap();
        assert_eq!(config.sample_mode(), SampleMode::Exact);
    }

    #[test]
    fn test_unknown_gate_rejected() {
        let err = PuzzleConfig::from_yaml("allowed_gates: {0: {t: 1}}").unwrap_err();
        assert!(matches!(err, PuzzleError::UnknownGate(g) if g == "t"));
    }

    #[test]
    fn test_bloch_in_initializer_rejected() {
        let err = PuzzleConfig::from_yaml("initialize: [[bloch, 0]]").unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidConfig(_)));
    }

    #[test]
    fn test_y_observable_requires_y_mode() {
        let err = PuzzleConfig::from_yaml("success_condition: {YY: 1.0}").unwrap_err();
        assert!(matches!(err, PuzzleError::UnknownObservable(_)));
        assert!(PuzzleConfig::from_yaml("mode: y\nsuccess_condition: {YY: 1.0}").is_ok());
    }

    #[test]
    fn test_bad_qubit_key() {
        assert!(PuzzleConfig::from_yaml("initialize: [[x, 2]]").is_err());
    }

    #[test]
    fn test_counters() {
        let mut gates = AllowedGates::default();
        gates.insert(QubitTarget::Zero, "x", 2);
        gates.insert(QubitTarget::Both, "cz", 0);
        assert!(!gates.all_zero());
        assert_eq!(gates.decrement(QubitTarget::Zero, "x"), Some(1));
        assert_eq!(gates.decrement(QubitTarget::Zero, "x"), Some(0));
        assert_eq!(gates.decrement(QubitTarget::Zero, "x"), Some(0));
        assert_eq!(gates.decrement(QubitTarget::One, "x"), None);
        assert!(gates.all_zero());
        assert_eq!(gates.labels(), vec!["cz", "x"]);
    }
}
