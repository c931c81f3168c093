//! Grid command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tracing::debug;

use qtext_hal::SampleMode;
use qtext_puzzle::{ExpectationMap, PauliGrid, QubitNames, View};

use super::common::{parse_gate_list, parse_mode, print_expectations, simulator, write_svg};

#[derive(Serialize)]
struct GridReport<'a> {
    mode: String,
    sampling: String,
    program: Vec<String>,
    expectations: &'a ExpectationMap,
}

/// Execute the grid command.
pub fn execute(
    gates: &str,
    mode: &str,
    shots: Option<u32>,
    seed: Option<u64>,
    json: bool,
    svg: Option<&Path>,
) -> Result<()> {
    let mode = parse_mode(mode)?;
    let ops = parse_gate_list(gates)?;
    let sample_mode = match shots {
        Some(0) => anyhow::bail!("Number of shots must be at least 1"),
        Some(shots) => SampleMode::Shots(shots),
        None => SampleMode::Exact,
    };

    debug!("{} operation(s), mode {mode:?}, {sample_mode}", ops.len());
    let mut grid = PauliGrid::new(Box::new(simulator(seed)), sample_mode, mode);
    grid.apply_initializer(&ops)
        .context("Failed to compute expectation values")?;

    let names = QubitNames::default();
    let program: Vec<String> = ops.iter().map(|op| op.listing(&names)).collect();

    if json {
        let report = GridReport {
            mode: format!("{mode:?}").to_lowercase(),
            sampling: sample_mode.to_string(),
            program,
            expectations: grid.expectations(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} {} operation(s), depth {}, {}",
            style("→").cyan().bold(),
            grid.circuit().num_ops(),
            grid.circuit().depth(),
            style(sample_mode).yellow()
        );
        for line in &program {
            println!("  {line}");
        }
        println!();
        print_expectations(grid.expectations());
    }

    if let Some(path) = svg {
        let view = View {
            hidden: vec![],
            qubit: true,
            corr: true,
            labels: true,
        };
        write_svg(path, &grid.render(&view, None, ""))?;
        if !json {
            println!("\n  Wrote {}", style(path.display()).green());
        }
    }
    Ok(())
}
