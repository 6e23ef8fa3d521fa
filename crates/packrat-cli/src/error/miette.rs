//! Miette diagnostic conversion for CLI errors.

use crate::error::{CliError, ConfigError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::BudgetExceeded { count } => miette::miette!(
            help = "Raise performance.maxAssetSize / maxEntrypointSize or set performance.hints to \"warning\"",
            "{count} asset(s) or entrypoint(s) exceed the performance budget"
        ),
        CliError::FileNotFound(path) => miette::miette!(
            help = "Build the project first or pass the output directory explicitly",
            "File not found: {}",
            path.display()
        ),
        _ => miette::miette!("{}", err),
    }
}

/// Convert ConfigError to miette Report
pub fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::NotFound => miette::miette!(
            help = "Create packrat.toml, pass --config <FILE>, or select a --preset",
            "{}",
            err
        ),
        ConfigError::Schema { .. } => miette::miette!(
            help = "Fix the keys listed above; names are camelCase as in the engine schema",
            "{}",
            err
        ),
        ConfigError::ProfileNotFound(_) => miette::miette!(
            help = "Define it as [profiles.<name>] in the configuration file",
            "{}",
            err
        ),
        _ => miette::miette!("{}", err),
    }
}
