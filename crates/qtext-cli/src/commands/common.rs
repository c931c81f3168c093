//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qtext_adapter_sim::SimulatorBackend;
use qtext_puzzle::{Choices, ExpectationMap, GateName, GateOp, Mode, PuzzleConfig, QubitTarget, Scene};

/// Load a puzzle definition from a YAML file.
pub fn load_puzzle_config(path: &Path) -> Result<PuzzleConfig> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    PuzzleConfig::from_yaml(&source).with_context(|| format!("Invalid puzzle: {}", path.display()))
}

/// Drawing mode by name.
pub fn parse_mode(mode: &str) -> Result<Mode> {
    match mode.to_lowercase().as_str() {
        "circle" => Ok(Mode::Circle),
        "line" => Ok(Mode::Line),
        "y" => Ok(Mode::Y),
        other => anyhow::bail!("Unknown mode: '{other}'. Available: circle, line, y"),
    }
}

/// Parse `gate:qubit` pairs separated by commas, e.g. `h:0,cx:1,cz:both`.
pub fn parse_gate_list(gates: &str) -> Result<Vec<GateOp>> {
    gates
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (gate, qubit) = entry
                .rsplit_once(':')
                .ok_or_else(|| anyhow::anyhow!("Expected gate:qubit, got '{entry}'"))?;
            let name: GateName = gate.trim().parse()?;
            let target: QubitTarget = qubit.parse()?;
            name.resolve(target)
                .ok_or_else(|| anyhow::anyhow!("'{gate}' is not a gate"))
        })
        .collect()
}

/// Simulator, seeded when a seed is given.
pub fn simulator(seed: Option<u64>) -> SimulatorBackend {
    match seed {
        Some(seed) => SimulatorBackend::with_seed(seed),
        None => SimulatorBackend::new(),
    }
}

/// Write a scene as an SVG document.
pub fn write_svg(path: &Path, scene: &Scene) -> Result<()> {
    fs::write(path, scene.to_svg())
        .with_context(|| format!("Failed to write SVG: {}", path.display()))
}

/// Print expectation values as a table with a bar per value.
pub fn print_expectations(rho: &ExpectationMap) {
    for (pauli, value) in rho.iter() {
        let bar_len = ((1.0 + value) * 10.0).round().max(0.0) as usize;
        let bar: String = "█".repeat(bar_len);
        println!(
            "  {}: {:>+7.3} {}",
            style(pauli).cyan(),
            value,
            style(bar).green()
        );
    }
}

/// Render the options on offer, one line per non-empty list. The target
/// row is headed by `qubit_word`, pluralised.
pub fn format_choices(choices: &Choices, qubit_word: &str) -> String {
    let targets = format!("{qubit_word}s");
    let mut out = String::new();
    for (label, items) in [
        ("gates", &choices.gates),
        (targets.as_str(), &choices.qubits),
        ("actions", &choices.actions),
    ] {
        if !items.is_empty() {
            out.push_str(&format!("  {label:<8} {}\n", items.join(", ")));
        }
    }
    out
}
