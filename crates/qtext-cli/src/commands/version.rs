//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - notebook tree validation and Pauli grid puzzles",
        style("qtext").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qtext-ir           Two-qubit circuit representation");
    println!("  qtext-hal          Sampling backend interface");
    println!("  qtext-adapter-sim  Local statevector simulator");
    println!("  qtext-puzzle       Pauli grid puzzles and SVG rendering");
    println!("  qtext-toc          Table-of-contents validator");
    println!("  qtext-cli          Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
