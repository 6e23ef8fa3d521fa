use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::OutputFormat;
use crate::cli::validation::parse_preset;

/// Available packrat subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the effective build configuration
    ///
    /// Loads the config file and its `extends` chain, applies the preset,
    /// profile and `PACKRAT_*` environment overrides, and prints the result.
    Resolve(ResolveArgs),

    /// Validate configuration without printing it
    ///
    /// Reports every problem with its key path, e.g.
    /// `optimization.splitChunks.maxSize`.
    Check(CheckArgs),

    /// Show how a module would be processed
    ///
    /// Prints the loaders applied to the module in execution order and the
    /// split-chunks cache group it lands in.
    Explain(ExplainArgs),

    /// Check emitted assets against the performance budget
    ///
    /// Exits with an error when `performance.hints` is `error` and an asset
    /// or entrypoint exceeds its limit.
    Budget(BudgetArgs),
}

/// Selects the configuration layers; shared by every command
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Configuration file (default: packrat.toml, packrat.json or package.json#packrat)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Profile from the configuration file to apply
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Built-in override preset (`production`, `development` or `none`)
    #[arg(long, value_name = "NAME", default_value = "production", value_parser = parse_preset)]
    pub preset: String,

    /// Ignore PACKRAT_* environment variables
    #[arg(long)]
    pub no_env: bool,

    /// Project root (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Also check that entry modules and HTML templates exist
    #[arg(long)]
    pub files: bool,
}

/// Arguments for the explain command
#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Module path to explain, e.g. `src/styles/app.css`
    #[arg(value_name = "MODULE")]
    pub module: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the budget command
#[derive(Args, Debug)]
pub struct BudgetArgs {
    /// Directory holding the emitted assets (default: `output.path`)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}
