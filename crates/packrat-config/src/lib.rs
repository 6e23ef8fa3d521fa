//! Typed build configuration for the packrat bundler.
//!
//! A project's base configuration is merged with override layers (a preset
//! such as [`presets::production`], named profiles, environment variables)
//! into one [`BuildConfig`]. Unknown keys and mistyped values are rejected
//! when a layer is loaded, with the offending key path.

pub mod build;
pub mod config;
pub mod discovery;
pub mod error;
pub mod merge;
pub mod presets;
pub mod validation;

// Re-export main types
pub use build::*;
pub use config::{ConfigFile, ConfigLayer};
pub use error::*;
pub use merge::{MergeRules, MergeStrategy, merge_values};

// Re-export discovery and validation
pub use discovery::{ConfigDiscovery, ConfigLoader, discover, discover_with_profile, load_file};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
