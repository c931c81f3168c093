//! qtext Command-Line Interface
//!
//! Entry point for the `qtext` tool: validate a notebook tree, play a
//! Pauli grid puzzle, or draw the grid for a gate list.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{grid, puzzle, toc, version};

/// qtext - notebook tree validation and two-qubit grid puzzles
#[derive(Parser)]
#[command(name = "qtext")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a notebook tree against its table of contents
    Toc {
        /// Notebook root directory
        #[arg(short, long, default_value = "notebooks")]
        notebooks: PathBuf,

        /// Table of contents (defaults to <notebooks>/toc.yaml)
        #[arg(short, long)]
        toc: Option<PathBuf>,
    },

    /// Play a puzzle, reading moves from stdin
    Puzzle {
        /// Puzzle definition (YAML)
        file: PathBuf,

        /// Rewrite this SVG file after every accepted move
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Use exact probabilities instead of shots
        #[arg(long)]
        exact: bool,

        /// Seed for shot sampling (overrides the puzzle file)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show the expectation values for a list of gates
    Grid {
        /// Comma-separated gate:qubit pairs, e.g. "h:0,cx:1"
        #[arg(short, long, default_value = "")]
        gates: String,

        /// Drawing mode (circle, line, y)
        #[arg(short, long, default_value = "line")]
        mode: String,

        /// Shots per basis (exact probabilities if omitted)
        #[arg(short, long)]
        shots: Option<u32>,

        /// Seed for shot sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Print the values as JSON
        #[arg(long)]
        json: bool,

        /// Write the grid as SVG
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Toc { notebooks, toc } => toc::execute(&notebooks, toc.as_deref()),

        Commands::Puzzle {
            file,
            svg,
            exact,
            seed,
        } => puzzle::execute(&file, svg.as_deref(), exact, seed),

        Commands::Grid {
            gates,
            mode,
            shots,
            seed,
            json,
            svg,
        } => grid::execute(&gates, &mode, shots, seed, json, svg.as_deref()),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
