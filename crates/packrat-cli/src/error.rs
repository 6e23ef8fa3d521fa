//! Error handling for the packrat CLI.
//!
//! Library failures arrive as [`packrat_config::ConfigError`] and are wrapped
//! in [`CliError`] together with the CLI's own failure modes (output files,
//! asset directories, exceeded budgets). `main` renders them through
//! [`miette`](crate::error::miette).
//!
//! # Example
//!
//! ```rust,no_run
//! use packrat_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_manifest(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Run the build before checking its budget")
//! }
//! ```

pub mod miette;

use std::path::PathBuf;
use thiserror::Error;

pub use packrat_config::ConfigError;
pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
///
/// This is the primary error type returned by CLI commands. It automatically
/// converts from domain-specific errors via `From` implementations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading, merging or validating configuration failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Walking the asset directory failed
    #[error("Failed to read assets: {0}")]
    Walk(#[from] walkdir::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// A filename template in the configuration is malformed
    #[error("Invalid filename template: {0}")]
    Template(#[from] packrat_config::TemplateError),

    /// Emitted assets exceed the budget and `performance.hints` is `error`
    #[error("{count} performance budget violation(s)")]
    BudgetExceeded {
        /// Number of oversized assets and entrypoints
        count: usize,
    },

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{err}\n\nHint: {hint}"))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{msg}: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packrat_config::SchemaViolation;

    #[test]
    fn test_cli_error_from_config_error() {
        let cli_err: CliError = ConfigError::NotFound.into();
        assert!(matches!(cli_err, CliError::Config(ConfigError::NotFound)));
    }

    #[test]
    fn test_config_error_message_is_kept() {
        let err: CliError = ConfigError::Schema {
            origin: "packrat.toml".into(),
            violations: vec![SchemaViolation {
                path: "performance.maxAssetSize".into(),
                message: "invalid type".into(),
            }],
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("packrat.toml"));
        assert!(msg.contains("performance.maxAssetSize: invalid type"));
    }

    #[test]
    fn test_budget_exceeded_message() {
        let err = CliError::BudgetExceeded { count: 2 };
        assert_eq!(err.to_string(), "2 performance budget violation(s)");
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.with_path("/test/dist").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(path) if path == PathBuf::from("/test/dist")));
    }

    #[test]
    fn test_result_ext_with_hint() {
        let result: std::result::Result<(), ConfigError> = Err(ConfigError::NotFound);
        let msg = result.with_hint("Create packrat.toml").unwrap_err().to_string();
        assert!(msg.contains("config not found"));
        assert!(msg.contains("Hint: Create packrat.toml"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::ProfileNotFound("ci".into()));
        let msg = result.context("Failed to load").unwrap_err().to_string();
        assert!(msg.starts_with("Failed to load: "));
        assert!(msg.contains("`ci`"));
    }
}
