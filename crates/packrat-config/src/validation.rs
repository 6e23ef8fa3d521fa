//! Pluggable config validation strategies
//!
//! Deserialization already rejects unknown keys and mistyped values. These
//! validators check what types cannot express: value ranges, cross-field
//! consistency and, for the CLI, files on disk.

use std::path::{Path, PathBuf};

use crate::build::{
    BuildConfig, CSS_EXTRACT_LOADER, FilenameTemplate, MinimizerSpec, PluginSpec,
    WorkerParallelism,
};
use crate::error::{ConfigError, Result, SchemaViolation};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    /// Validate a resolved build configuration
    fn validate(&self, config: &BuildConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// Reports every problem at once, each with its key path.
///
/// # Example
///
/// ```
/// use packrat_config::{BuildConfig, ConfigValidator, SchemaValidator};
///
/// let mut config = BuildConfig::default();
/// SchemaValidator.validate(&config).unwrap();
///
/// config.parallelism = 0;
/// let err = SchemaValidator.validate(&config).unwrap_err();
/// assert_eq!(err.violation_paths(), vec!["parallelism"]);
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        let mut violations = Violations::default();

        if config.parallelism == 0 {
            violations.push("parallelism", "must be at least 1");
        }

        if config.performance.max_asset_size == 0 {
            violations.push("performance.maxAssetSize", "budget must be greater than 0");
        }
        if config.performance.max_entrypoint_size == 0 {
            violations.push("performance.maxEntrypointSize", "budget must be greater than 0");
        }

        let split = &config.optimization.split_chunks;
        if let Some(max_size) = split.max_size {
            if max_size < split.min_size {
                violations.push(
                    "optimization.splitChunks.maxSize",
                    format!("{max_size} is below minSize ({})", split.min_size),
                );
            }
        }
        for (name, group) in &split.cache_groups {
            if group.min_chunks == Some(0) {
                violations.push(
                    format!("optimization.splitChunks.cacheGroups.{name}.minChunks"),
                    "must be at least 1",
                );
            }
        }

        for (index, minimizer) in config.optimization.minimizer.iter().enumerate() {
            if minimizer.parallel() == WorkerParallelism::Workers(0) {
                violations.push(
                    format!("optimization.minimizer.{index}.parallel"),
                    format!("{} needs at least one worker", minimizer.name()),
                );
            }
            if let MinimizerSpec::Terser(terser) = minimizer {
                if terser.terser_options.compress.passes == 0 {
                    violations.push(
                        format!("optimization.minimizer.{index}.terserOptions.compress.passes"),
                        "must be at least 1",
                    );
                }
            }
        }

        let has_css_extract = config.css_extract().is_some();
        for (index, rule) in config.module.rules.iter().enumerate() {
            if rule.test.is_none() && rule.include.is_empty() {
                violations.push(
                    format!("module.rules.{index}"),
                    "rule matches nothing; set `test` or `include`",
                );
            }
            if !has_css_extract && rule.loader_names().any(|loader| loader == CSS_EXTRACT_LOADER) {
                violations.push(
                    format!("module.rules.{index}.use"),
                    format!("`{CSS_EXTRACT_LOADER}` requires the `mini-css-extract` plugin"),
                );
            }
        }

        violations.template("output.filename", &config.output.filename);
        if let Some(chunk_filename) = &config.output.chunk_filename {
            violations.template("output.chunkFilename", chunk_filename);
        }
        for (index, plugin) in config.plugins.iter().enumerate() {
            if let PluginSpec::MiniCssExtract(css) = plugin {
                violations.template(format!("plugins.{index}.filename"), &css.filename);
                if let Some(chunk_filename) = &css.chunk_filename {
                    violations.template(format!("plugins.{index}.chunkFilename"), chunk_filename);
                }
            }
        }

        violations.into_result()
    }
}

#[derive(Default)]
struct Violations(Vec<SchemaViolation>);

impl Violations {
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(SchemaViolation {
            path: path.into(),
            message: message.into(),
        });
    }

    fn template(&mut self, path: impl Into<String>, raw: &str) {
        if let Err(err) = FilenameTemplate::new(raw).placeholders() {
            self.push(path, err.to_string());
        }
    }

    fn into_result(self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Schema {
                origin: "validation".to_string(),
                violations: self.0,
            })
        }
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs [`SchemaValidator`], then checks that entry modules and HTML
/// templates exist relative to the root.
///
/// # Example
///
/// ```no_run
/// use packrat_config::{BuildConfig, ConfigValidator, FsValidator};
///
/// let mut config = BuildConfig::default();
/// config.entry.insert("main".into(), "src/index.js".into());
///
/// FsValidator::new(".").validate(&config).unwrap();
/// ```
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        for (name, module) in &config.entry {
            let path = self.root.join(module);
            if !path.exists() {
                return Err(ConfigError::EntryNotFound {
                    name: name.clone(),
                    path,
                });
            }
        }

        for (index, plugin) in config.plugins.iter().enumerate() {
            if let PluginSpec::Html(html) = plugin {
                if let Some(template) = &html.template {
                    let path = self.root.join(template);
                    if !path.exists() {
                        return Err(ConfigError::InvalidValue {
                            field: format!("plugins.{index}.template"),
                            hint: Some(format!("{} does not exist", path.display())),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &BuildConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
///
/// # Example
///
/// ```no_run
/// use packrat_config::{BuildConfig, validate_fs};
///
/// validate_fs(&BuildConfig::default(), ".").unwrap();
/// ```
pub fn validate_fs(config: &BuildConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}
