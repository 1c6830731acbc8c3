use console::style;

use crate::types::FigsonaError;

/// Status lines for command handlers.
///
/// Status goes to stderr so that `--format json` output on stdout stays
/// machine readable. `quiet` silences everything except errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("✓").green(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("ℹ").blue(), message);
        }
    }

    /// Error line plus the category hint, if the error carries one
    pub fn failure(&self, context: &str, err: &FigsonaError) {
        self.error(&format!("{}: {}", context, err));
        if let Some(hint) = err.category().and_then(|c| c.hint()) {
            eprintln!("  {}", style(hint).dim());
        }
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Aligned `label: value` line
    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        println!("  {:<10} {}", style(format!("{}:", label)).dim(), value);
    }
}
