//! Check command implementation.
//!
//! Loads, merges and validates configuration without printing it.

use packrat_config::{ConfigValidator, FsValidator, SchemaValidator};
use tracing::info;

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load every layer; unknown keys and mistyped values fail here
/// 2. Range and consistency checks on the merged record
/// 3. With `--files`, entry modules and HTML templates must exist
///
/// # Errors
///
/// Returns the first failing step's error; schema errors list every
/// offending key path.
pub fn execute(args: CheckArgs) -> Result<()> {
    let config = utils::load_config(&args.config)?;
    info!(mode = %config.mode, "configuration loaded");

    if args.files {
        let root = utils::project_root(&args.config)?;
        FsValidator::new(&root).validate(&config)?;
    } else {
        SchemaValidator.validate(&config)?;
    }

    if config.performance.hints == packrat_config::PerformanceHints::Off {
        ui::warning("performance hints are disabled; budgets are not enforced");
    }
    if !config.devtool.emits_source_maps() && config.mode == packrat_config::Mode::Development {
        ui::warning("development build without source maps");
    }

    ui::success(&format!(
        "Configuration is valid ({} mode, {} rule(s), {} plugin(s))",
        config.mode,
        config.module.rules.len(),
        config.plugins.len()
    ));
    Ok(())
}
