//! Error types for configuration loading, merging and validation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// A single schema problem, located by its dotted key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Dotted key path, e.g. `optimization.splitChunks.maxSize`. Empty for the root.
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors (for CLI use)
    #[error("entry `{name}` not found: {}", path.display())]
    EntryNotFound { name: String, path: PathBuf },

    // Config parsing/loading errors
    #[error("config not found (looked for packrat.toml, packrat.json and package.json#packrat)")]
    NotFound,

    #[error("unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("invalid configuration in {origin}:\n{}", render_violations(violations))]
    Schema {
        origin: String,
        violations: Vec<SchemaViolation>,
    },

    #[error("invalid config value for `{field}`{}", hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("profile `{0}` is not defined in the configuration")]
    ProfileNotFound(String),

    #[error("unknown preset `{0}` (available: production, development)")]
    UnknownPreset(String),

    #[error("`extends` cycle detected at {}", .0.display())]
    ExtendsCycle(PathBuf),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Key paths of every schema violation carried by this error.
    pub fn violation_paths(&self) -> Vec<&str> {
        match self {
            ConfigError::Schema { violations, .. } => {
                violations.iter().map(|v| v.path.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

fn render_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}
