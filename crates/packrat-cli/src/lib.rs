//! packrat CLI - layered build configuration for JavaScript bundlers.
//!
//! This crate provides the command-line interface over `packrat-config`:
//! it selects configuration layers from flags, resolves them, and reports
//! the result.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - One module per subcommand, each with an `execute` function
//! - [`error`] - `CliError` and miette rendering
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - Status lines and report formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use packrat_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

// Re-export commonly used types
pub use error::{CliError, ConfigError, Result, ResultExt};
