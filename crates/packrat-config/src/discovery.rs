//! File-based config discovery and layered loading for CLI use
//!
//! Finds the project's configuration file, follows its `extends` chain and
//! folds the result with a preset, a profile and environment overrides into
//! one [`BuildConfig`].

use std::fs;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::Env;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::build::BuildConfig;
use crate::config::{ConfigFile, ConfigLayer};
use crate::error::{ConfigError, Result};
use crate::merge::MergeRules;
use crate::presets;

/// Prefix of environment overrides, e.g. `PACKRAT_MODE=development`
pub const ENV_PREFIX: &str = "PACKRAT_";

/// Keys that may be overridden from the environment
pub const ENV_KEYS: &[&str] = &["mode", "devtool", "parallelism"];

const PACKAGE_JSON_FIELD: &str = "packrat";

/// File-based configuration discovery
///
/// Searches for packrat configuration files in conventional locations and loads them.
/// Library users holding a value already should use [`ConfigFile::from_value`].
///
/// # Example
///
/// ```no_run
/// use packrat_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let file = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. packrat.toml
    /// 2. packrat.json
    /// 3. package.json (packrat field)
    pub fn find(&self) -> Option<PathBuf> {
        for name in ["packrat.toml", "packrat.json"] {
            let path = self.root.join(name);
            if path.is_file() {
                return Some(path);
            }
        }

        let pkg_path = self.root.join("package.json");
        let has_field = fs::read_to_string(&pkg_path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .is_some_and(|parsed| {
                parsed
                    .get(PACKAGE_JSON_FIELD)
                    .is_some_and(|field| !field.is_null())
            });
        has_field.then_some(pkg_path)
    }

    /// Load the discovered file, without following `extends`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<ConfigFile> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        load_file(&path)
    }

    /// Load `path` and every file it extends, base first.
    pub fn load_chain(&self, path: &Path) -> Result<Vec<ConfigFile>> {
        let mut chain = Vec::new();
        let mut seen: Vec<PathBuf> = Vec::new();
        let mut next = Some(path.to_path_buf());

        while let Some(path) = next {
            let canonical = fs::canonicalize(&path)?;
            if seen.contains(&canonical) {
                return Err(ConfigError::ExtendsCycle(path));
            }
            seen.push(canonical);

            let file = load_file(&path)?;
            next = file.extends.as_deref().map(|base| {
                path.parent()
                    .unwrap_or_else(|| Path::new("."))
                    .join(base)
            });
            if let Some(base) = &next {
                debug!(file = %path.display(), extends = %base.display(), "following extends");
            }
            chain.push(file);
        }

        chain.reverse();
        Ok(chain)
    }
}

/// Load a single configuration file by extension.
pub fn load_file(path: &Path) -> Result<ConfigFile> {
    let origin = path.display().to_string();
    let is_package_json = path.file_name().is_some_and(|name| name == "package.json");
    let extension = path.extension().and_then(|ext| ext.to_str());

    match (is_package_json, extension) {
        (true, _) => load_package_json(path),
        (false, Some("toml")) => ConfigFile::from_toml_str(&origin, &fs::read_to_string(path)?),
        (false, Some("json")) => ConfigFile::from_json_str(&origin, &fs::read_to_string(path)?),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn load_package_json(path: &Path) -> Result<ConfigFile> {
    let origin = format!("{}#{PACKAGE_JSON_FIELD}", path.display());
    let content = fs::read_to_string(path)?;

    let mut parsed: Value = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
        origin: origin.clone(),
        message: format!("invalid JSON: {e}"),
    })?;

    match parsed.get_mut(PACKAGE_JSON_FIELD).map(Value::take) {
        None | Some(Value::Null) => Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: Some(format!("Add a '{PACKAGE_JSON_FIELD}' field to your package.json")),
        }),
        Some(value) => ConfigFile::from_value(&origin, value),
    }
}

/// Build-time overrides read from `PACKRAT_*` variables.
pub fn env_layer() -> Result<ConfigLayer> {
    let provider = Env::prefixed(ENV_PREFIX).only(ENV_KEYS);
    let values: Map<String, Value> =
        Figment::from(provider)
            .extract()
            .map_err(|e| ConfigError::Parse {
                origin: "environment".to_string(),
                message: e.to_string(),
            })?;
    if !values.is_empty() {
        debug!(keys = ?values.keys().collect::<Vec<_>>(), "environment overrides");
    }
    ConfigLayer::new("environment", Value::Object(values))
}

/// Folds every configuration source into one [`BuildConfig`].
///
/// Layers apply in this order, later ones winning: the `extends` chain
/// (base first), the config file, the preset, the profile, then `PACKRAT_*`
/// environment variables.
///
/// # Example
///
/// ```no_run
/// use packrat_config::ConfigLoader;
///
/// let config = ConfigLoader::new(".")
///     .preset("production")
///     .profile("staging")
///     .load()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    file: Option<PathBuf>,
    preset: Option<String>,
    profile: Option<String>,
    env: bool,
    rules: MergeRules,
}

impl ConfigLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            file: None,
            preset: None,
            profile: None,
            env: true,
            rules: MergeRules::standard(),
        }
    }

    /// Use this file instead of searching the root. Relative paths resolve
    /// against the root.
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(self.root.join(path));
        self
    }

    pub fn preset(mut self, name: impl Into<String>) -> Self {
        self.preset = Some(name.into());
        self
    }

    pub fn profile(mut self, name: impl Into<String>) -> Self {
        self.profile = Some(name.into());
        self
    }

    /// Whether `PACKRAT_*` variables are read (on by default).
    pub fn env(mut self, enabled: bool) -> Self {
        self.env = enabled;
        self
    }

    pub fn rules(mut self, rules: MergeRules) -> Self {
        self.rules = rules;
        self
    }

    /// Every layer that [`ConfigLoader::load`] folds, in application order.
    ///
    /// A missing config file is only an error when neither a file nor a
    /// preset was requested.
    pub fn layers(&self) -> Result<Vec<ConfigLayer>> {
        let discovery = ConfigDiscovery::new(&self.root);
        let path = match &self.file {
            Some(path) => Some(path.clone()),
            None => discovery.find(),
        };

        let chain = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration file");
                discovery.load_chain(&path)?
            }
            None if self.preset.is_some() => Vec::new(),
            None => return Err(ConfigError::NotFound),
        };

        let mut layers: Vec<ConfigLayer> = chain.iter().map(|file| file.layer.clone()).collect();

        if let Some(name) = &self.preset {
            layers.push(presets::lookup(name)?);
        }

        if let Some(name) = &self.profile {
            let matching: Vec<ConfigLayer> = chain
                .iter()
                .filter_map(|file| file.profiles.get(name).cloned())
                .collect();
            if matching.is_empty() {
                return Err(ConfigError::ProfileNotFound(name.clone()));
            }
            layers.extend(matching);
        }

        if self.env {
            let env = env_layer()?;
            if !env.is_empty() {
                layers.push(env);
            }
        }

        Ok(layers)
    }

    pub fn load(&self) -> Result<BuildConfig> {
        let layers = self.layers()?;
        let merged = ConfigLayer::empty("defaults").merged_all(&layers, &self.rules);
        let config = merged.resolve()?;
        info!(
            layers = layers.len(),
            mode = %config.mode,
            "resolved build configuration"
        );
        Ok(config)
    }
}

/// Discover and load config from current directory (convenience function)
///
/// # Example
///
/// ```no_run
/// use packrat_config::discover;
///
/// let config = discover().unwrap();
/// ```
pub fn discover() -> Result<BuildConfig> {
    let root = std::env::current_dir()?;
    ConfigLoader::new(&root).load()
}

/// Discover and load config with the production preset and a profile
/// (convenience function)
///
/// # Example
///
/// ```no_run
/// use packrat_config::discover_with_profile;
///
/// let config = discover_with_profile("staging").unwrap();
/// ```
pub fn discover_with_profile(profile: &str) -> Result<BuildConfig> {
    let root = std::env::current_dir()?;
    ConfigLoader::new(&root)
        .preset("production")
        .profile(profile)
        .load()
}
