//! Status lines written to stderr.
//!
//! Stdout is reserved for command output (`resolve` JSON, budget tables) so
//! it can be piped; every status line goes to stderr.

use owo_colors::{OwoColorize, Style};

use crate::ui::colors_enabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Info,
    Warning,
    Error,
}

impl Status {
    fn symbol(self) -> &'static str {
        match self {
            Status::Success => "✓",
            Status::Info => "ℹ",
            Status::Warning => "⚠",
            Status::Error => "✗",
        }
    }

    fn symbol_style(self) -> Style {
        let style = Style::new().bold();
        match self {
            Status::Success => style.green(),
            Status::Info => style.blue(),
            Status::Warning => style.yellow(),
            Status::Error => style.red(),
        }
    }

    /// Only problems tint the message body.
    fn message_style(self) -> Style {
        match self {
            Status::Warning => Style::new().yellow(),
            Status::Error => Style::new().red(),
            Status::Success | Status::Info => Style::new(),
        }
    }

    fn render(self, message: &str, color: bool) -> String {
        if color {
            format!(
                "{} {}",
                self.symbol().style(self.symbol_style()),
                message.style(self.message_style())
            )
        } else {
            format!("{} {message}", self.symbol())
        }
    }
}

fn emit(status: Status, message: &str) {
    eprintln!("{}", status.render(message, colors_enabled()));
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    emit(Status::Success, message);
}

pub fn info(message: &str) {
    emit(Status::Info, message);
}

/// Print a warning message to stderr.
///
/// # Examples
///
/// ```no_run
/// use packrat_cli::ui::warning;
///
/// warning("performance hints are disabled; budgets are not enforced");
/// ```
pub fn warning(message: &str) {
    emit(Status::Warning, message);
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    emit(Status::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rendering_has_symbol_prefix() {
        assert_eq!(Status::Success.render("done", false), "✓ done");
        assert_eq!(
            Status::Error.render("asset `main.js` is over budget", false),
            "✗ asset `main.js` is over budget"
        );
    }

    #[test]
    fn colored_rendering_keeps_the_message() {
        let rendered = Status::Warning.render("hints disabled", true);
        assert!(rendered.contains("hints disabled"));
        assert!(rendered.contains('\u{1b}'));
    }

    #[test]
    fn test_status_messages() {
        success("Success message");
        info("Info message");
        warning("Warning message");
        error("Error message");
    }
}
