//! Per-file progress reporting on the terminal.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};

/// Colored stderr reporter for conversion progress.
pub(crate) struct Output {
    term: Term,
    converted: Style,
    skipped: Style,
    failed: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            converted: Style::new().green(),
            skipped: Style::new().yellow(),
            failed: Style::new().red().bold(),
        }
    }

    /// Report a written HTML file (green).
    pub(crate) fn converted(&self, input: &Path, output: &Path) {
        self.line(
            &self.converted,
            &format!("{} -> {}", input.display(), output.display()),
        );
    }

    /// Report an argument that is not a markdown file (yellow).
    pub(crate) fn skipped(&self, input: &Path) {
        self.line(
            &self.skipped,
            &format!("Skipping {}: not a .md file", input.display()),
        );
    }

    /// Report the error that stopped the run (bold red).
    pub(crate) fn failed(&self, err: &impl Display) {
        self.line(&self.failed, &format!("Error: {err}"));
    }

    fn line(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
