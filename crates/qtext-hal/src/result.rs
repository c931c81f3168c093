//! Measurement results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How a backend should turn a circuit into an outcome distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleMode {
    /// Ideal final-state probabilities, no sampling noise.
    Exact,
    /// Stochastic sampling with the given number of shots.
    Shots(u32),
}

impl Default for SampleMode {
    fn default() -> Self {
        SampleMode::Shots(1024)
    }
}

impl fmt::Display for SampleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleMode::Exact => write!(f, "exact"),
            SampleMode::Shots(n) => write!(f, "{n} shots"),
        }
    }
}

/// Measurement counts keyed by bitstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Count for a bitstring, zero if never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total_shots(&self) -> u64 {
        self.0.values().sum()
    }

    /// Iterate over `(bitstring, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }

    /// Normalise into a probability distribution.
    pub fn to_distribution(&self) -> Distribution {
        let total = self.total_shots();
        if total == 0 {
            return Distribution::default();
        }
        let total = total as f64;
        Distribution(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), *v as f64 / total))
                .collect(),
        )
    }
}

/// A normalised outcome distribution keyed by bitstring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution(BTreeMap<String, f64>);

impl Distribution {
    /// Build from explicit probabilities; zero entries are dropped.
    pub fn from_probabilities(probs: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self(probs.into_iter().filter(|(_, p)| *p > 0.0).collect())
    }

    /// Probability of a bitstring, zero if absent.
    pub fn get(&self, bitstring: &str) -> f64 {
        self.0.get(bitstring).copied().unwrap_or(0.0)
    }

    /// Iterate over `(bitstring, probability)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Number of outcomes with non-zero probability.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no outcome has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
