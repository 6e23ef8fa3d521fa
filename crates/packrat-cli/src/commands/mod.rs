//! Command implementations for the packrat CLI.
//!
//! - [`resolve`] - Print the effective configuration
//! - [`check`] - Validate configuration
//! - [`explain`] - Loader pipeline and cache group for one module
//! - [`budget`] - Performance budget over emitted assets
//!
//! Each command is implemented in its own module and provides an `execute`
//! function that takes the parsed command arguments and returns a Result.

pub mod budget;
pub mod check;
pub mod explain;
pub mod resolve;
pub(crate) mod utils;

// Re-export execute functions for convenience
pub use budget::execute as budget_execute;
pub use check::execute as check_execute;
pub use explain::execute as explain_execute;
pub use resolve::execute as resolve_execute;
