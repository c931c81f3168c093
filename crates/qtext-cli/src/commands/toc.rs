//! Toc command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use qtext_toc::Validator;

/// Execute the toc command.
pub fn execute(notebooks: &Path, toc: Option<&Path>) -> Result<()> {
    if !notebooks.is_dir() {
        anyhow::bail!("Notebook directory not found: {}", notebooks.display());
    }

    let mut validator = Validator::new(notebooks);
    if let Some(toc) = toc {
        validator = validator.with_toc(toc);
    }

    println!(
        "{} Checking {} against {}",
        style("→").cyan().bold(),
        style(notebooks.display()).green(),
        style(validator.toc_path().display()).yellow()
    );

    let report = validator.run()?;

    println!(
        "{} {} course(s), {} page(s), {} notebook(s) ({} ignored)",
        style("✓").green().bold(),
        report.courses,
        report.pages,
        report.notebooks,
        report.ignored
    );
    Ok(())
}
