//! Puzzle command implementation.
//!
//! Moves are read one per line:
//!
//! ```text
//! gate h          choose a gate
//! qubit q[0]      choose a qubit for it
//! apply           apply the chosen operation
//! h q[0]          all three at once
//! quit            stop
//! ```

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::debug;

use qtext_puzzle::{Event, Puzzle};

use super::common::{format_choices, load_puzzle_config, simulator, write_svg};

/// Execute the puzzle command.
pub fn execute(file: &Path, svg: Option<&Path>, exact: bool, seed: Option<u64>) -> Result<()> {
    let mut config = load_puzzle_config(file)?;
    if exact {
        config.exact = true;
    }
    let backend = simulator(seed.or(config.seed));
    let mut puzzle = Puzzle::new(config, Box::new(backend))
        .with_context(|| format!("Failed to set up puzzle: {}", file.display()))?;

    println!(
        "{} {} ({})",
        style("→").cyan().bold(),
        style(puzzle.name().unwrap_or("Puzzle")).green(),
        style(puzzle.grid().sample_mode()).yellow()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play(&mut puzzle, stdin.lock(), &mut stdout, svg)?;

    if puzzle.is_solved() {
        println!("\n{} Solved!", style("✓").green().bold());
    } else {
        println!("\n{} Not solved yet", style("✗").red());
    }
    let listing = puzzle.program_listing();
    if !listing.is_empty() {
        println!("\nYour program:");
        for line in listing {
            println!("  {line}");
        }
    }
    Ok(())
}

/// Turn one input line into events. Blank lines and `#` comments give none.
pub fn parse_command(line: &str) -> Result<Vec<Event>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(vec![]);
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let events = match (head, rest) {
        ("apply", "") => vec![Event::Confirm],
        ("gate", "") | ("qubit", "") => anyhow::bail!("'{head}' needs a name"),
        ("gate", gate) => vec![Event::ChooseGate(gate.to_string())],
        ("qubit", qubit) => vec![Event::ChooseQubit(qubit.to_string())],
        (gate, "") => vec![Event::ChooseGate(gate.to_string())],
        (gate, qubit) => vec![
            Event::ChooseGate(gate.to_string()),
            Event::ChooseQubit(qubit.to_string()),
            Event::Confirm,
        ],
    };
    Ok(events)
}

/// Feed moves from `input` to the puzzle until it is solved, the input
/// ends, or `quit` is read. Rejected moves are reported and skipped.
pub fn play<R: BufRead, W: Write>(
    puzzle: &mut Puzzle,
    input: R,
    out: &mut W,
    svg: Option<&Path>,
) -> Result<()> {
    let refresh = |puzzle: &Puzzle| -> Result<()> {
        match svg {
            Some(path) => write_svg(path, &puzzle.render()),
            None => Ok(()),
        }
    };

    refresh(puzzle)?;
    write!(out, "{}", puzzle.gate_list_message())?;
    write!(out, "{}", format_choices(&puzzle.choices(), puzzle.qubit_word()))?;

    for line in input.lines() {
        let line = line.context("Failed to read move")?;
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }

        let events = match parse_command(&line) {
            Ok(events) => events,
            Err(e) => {
                writeln!(out, "  ! {e}")?;
                continue;
            }
        };

        debug!("move {:?} -> {events:?}", line.trim());
        for event in events {
            let confirm = event == Event::Confirm;
            match puzzle.handle(event) {
                Ok(choices) => {
                    if confirm {
                        refresh(puzzle)?;
                        write!(out, "{}", puzzle.gate_list_message())?;
                    }
                    write!(out, "{}", format_choices(&choices, puzzle.qubit_word()))?;
                }
                Err(e) => {
                    writeln!(out, "  ! {e}")?;
                    break;
                }
            }
        }

        if puzzle.is_solved() {
            break;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtext_adapter_sim::SimulatorBackend;

    const ONE_MOVE: &str = "exact: true\nsuccess_condition: {ZI: -1.0}\nallowed_gates:\n  0: {x: 1}\n";

    #[test]
    fn test_parse_command_forms() {
        assert!(parse_command("  ").unwrap().is_empty());
        assert!(parse_command("# note").unwrap().is_empty());
        assert_eq!(parse_command("apply").unwrap(), vec![Event::Confirm]);
        assert_eq!(
            parse_command("gate ry(pi/4)").unwrap(),
            vec![Event::ChooseGate("ry(pi/4)".into())]
        );
        assert_eq!(
            parse_command("cz not required").unwrap(),
            vec![
                Event::ChooseGate("cz".into()),
                Event::ChooseQubit("not required".into()),
                Event::Confirm,
            ]
        );
        assert!(parse_command("qubit").is_err());
    }

    #[test]
    fn test_play_until_solved() {
        let mut puzzle = Puzzle::from_yaml(ONE_MOVE, Box::new(SimulatorBackend::new())).unwrap();
        let mut out = Vec::new();
        let input = "h q[0]\nx q[0]\nx q[0]\n";
        play(&mut puzzle, input.as_bytes(), &mut out, None).unwrap();

        assert!(puzzle.is_solved());
        assert_eq!(puzzle.program().len(), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("! Gate 'h' is not allowed in this puzzle"));
        assert!(text.contains("Success!"));
    }

    #[test]
    fn test_bit_puzzle_offers_bits() {
        let yaml = "allowed_gates:\n  0: {NOT: 0}\n  1: {NOT: 0}\nview: {qubit: false}\n";
        let mut puzzle = Puzzle::from_yaml(yaml, Box::new(SimulatorBackend::new())).unwrap();
        let mut out = Vec::new();
        play(&mut puzzle, "gate NOT\n".as_bytes(), &mut out, None).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  bits     q[1], q[0]\n"));
        assert!(!text.contains("qubits"));
    }

    #[test]
    fn test_play_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.svg");
        let mut puzzle = Puzzle::from_yaml(ONE_MOVE, Box::new(SimulatorBackend::new())).unwrap();
        let mut out = Vec::new();
        play(&mut puzzle, "quit\nx q[0]\n".as_bytes(), &mut out, Some(&path)).unwrap();

        assert!(!puzzle.is_solved());
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Allowed operations for q[0]:"));
    }
}
