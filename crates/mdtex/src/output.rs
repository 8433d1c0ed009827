//! Status reporting on stderr.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};

/// Reports conversion status on stderr, leaving stdout to the fragment.
pub(crate) struct Output {
    term: Term,
    label: Style,
    warning: Style,
    error: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().green().bold(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
        }
    }

    /// Report content the renderer dropped.
    pub(crate) fn dropped(&self, warnings: &[String]) {
        for warning in warnings {
            let _ = self.term.write_line(&self.dropped_line(warning));
        }
    }

    /// Report a fragment written to `path`.
    pub(crate) fn written(&self, path: &Path, heading_count: usize) {
        let _ = self.term.write_line(&self.written_line(path, heading_count));
    }

    /// Report a failed conversion.
    pub(crate) fn failed(&self, err: &dyn Display) {
        let _ = self
            .term
            .write_line(&self.error.apply_to(format!("error: {err}")).to_string());
    }

    fn dropped_line(&self, warning: &str) -> String {
        format!("{} {warning}", self.warning.apply_to("warning:"))
    }

    fn written_line(&self, path: &Path, heading_count: usize) -> String {
        let headings = if heading_count == 1 {
            "heading"
        } else {
            "headings"
        };
        format!(
            "{} {} ({heading_count} {headings})",
            self.label.apply_to("Wrote"),
            path.display()
        )
    }
}
