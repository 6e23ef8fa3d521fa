//! Logging infrastructure for the packrat CLI.
//!
//! Library crates emit `tracing` events (one per configuration layer merged,
//! one when the configuration is resolved); this module decides which of
//! them reach stderr.
//!
//! # Example
//!
//! ```rust,no_run
//! use packrat_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("resolving configuration");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: &[&str] = &["packrat", "packrat_config", "packrat_cli"];

/// Filter directives for one level across every packrat crate.
fn directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Choose the log filter from the CLI flags.
///
/// The level is determined in this order:
/// 1. `--verbose`: DEBUG for packrat crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`
/// 4. Default: WARN, so command output stays clean
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(directives("debug"))
    } else if quiet {
        EnvFilter::new(directives("error"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives("warn")))
    }
}

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at the start of the program, before any logging occurs.
/// Events are written to stderr so stdout carries only command output.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize logger with custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second initialization (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_cover_every_crate() {
        assert_eq!(
            directives("debug"),
            "packrat=debug,packrat_config=debug,packrat_cli=debug"
        );
    }

    #[test]
    fn test_filters_build() {
        let _verbose = filter_for(true, false);
        let _quiet = filter_for(false, true);
        let _default = filter_for(false, false);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
