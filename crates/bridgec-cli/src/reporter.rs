use bridgec_common::{BindingError, ErrorCategory};
use colored::Colorize;
use std::path::Path;

/// Renders fatal errors and the run summary for the terminal.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// First line: category and root cause. Then one line per enclosing
    /// declaration, outermost first.
    pub fn format_binding_error(&self, error: &BindingError) -> String {
        let mut output = format!(
            "{}: {}",
            self.format_category(error.category()),
            error.root_cause()
        );
        for link in error.chain() {
            if let BindingError::InDeclaration {
                declaration,
                location,
                ..
            } = link
            {
                output.push_str("\n  ");
                output.push_str(&self.dim("while processing"));
                output.push_str(&format!(" '{declaration}' at {location}"));
            }
        }
        output
    }

    /// Usage and I/O failures, with the full `anyhow` context chain.
    pub fn format_failure(&self, error: &anyhow::Error) -> String {
        format!("{}: {error:#}", self.label("error"))
    }

    pub fn format_written(&self, paths: &[&Path]) -> String {
        let mut output = String::new();
        for path in paths {
            output.push_str(&self.dim("wrote"));
            output.push(' ');
            output.push_str(&path.display().to_string());
            output.push('\n');
        }
        output
    }

    fn format_category(&self, category: ErrorCategory) -> String {
        let label = format!("error[{category}]");
        if !self.color {
            return label;
        }

        match category {
            ErrorCategory::Resolution => label.red().bold().to_string(),
            ErrorCategory::UnsupportedConstruct => label.yellow().bold().to_string(),
            ErrorCategory::InvariantViolation => label.magenta().bold().to_string(),
        }
    }

    fn label(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }
}
