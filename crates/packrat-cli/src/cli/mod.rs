//! Command-line interface definition for packrat.
//!
//! This module defines the complete CLI structure using clap v4's derive macros.
//!
//! # Command Structure
//!
//! - `packrat resolve` - Print the effective build configuration
//! - `packrat check` - Validate configuration without printing it
//! - `packrat explain` - Show the loaders and cache group applied to a module
//! - `packrat budget` - Measure emitted assets against the performance budget

mod commands;
pub mod enums;
mod tests;
mod validation;

use clap::Parser;

pub use commands::{BudgetArgs, CheckArgs, Command, ConfigArgs, ExplainArgs, ResolveArgs};
pub use enums::*;
pub use validation::parse_preset;

/// packrat - layered build configuration for JavaScript bundlers
#[derive(Parser, Debug)]
#[command(
    name = "packrat",
    version,
    about = "Layered, validated build configuration for JavaScript bundlers",
    long_about = "packrat merges a project's base build configuration with production overrides,\n\
                  profiles and environment variables, rejects malformed keys with their path,\n\
                  and prints the effective configuration for the bundling engine."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows every configuration layer as it is loaded and merged.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
