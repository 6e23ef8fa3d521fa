//! Terminal output: status lines on stderr and formatted reports.
//!
//! Command results (the resolved configuration, explanations, budget tables)
//! go to stdout; status messages go to stderr so output can be piped.
//!
//! # Examples
//!
//! ```no_run
//! use packrat_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Configuration is valid");
//! ui::warning("asset `main.js` is over budget");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_size, print_budget_report, print_explanation};
pub use messages::{error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Decide once whether status lines are colored. `--no-color` always wins.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
