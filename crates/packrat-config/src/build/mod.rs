//! The build configuration record consumed by the bundling engine.

mod helpers;
mod optimization;
mod output;
mod performance;
mod plugin;
mod rules;
mod types;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use optimization::{
    CacheGroup, CompressOptions, CssMinimizerOptions, MinimizerSpec, Optimization, SplitChunks,
    TerserOptions, TerserPluginOptions, WorkerParallelism,
};
pub use output::{
    AssetSource, DEFAULT_HASH_LENGTH, FilenameTemplate, OutputOptions, Placeholder,
    ResolveOptions, TemplateError,
};
pub use performance::{
    AssetSize, BudgetReport, BudgetSubject, BudgetViolation, EntrypointAssets, Performance,
};
pub use plugin::{CSS_EXTRACT_LOADER, CssExtractOptions, DefineOptions, HtmlOptions, PluginSpec};
pub use rules::{LoaderSpec, ModuleOptions, Pattern, RuleSetRule, UseEntry};
pub use types::{ChunkFilter, Devtool, Mode, PerformanceHints};

use helpers::default_parallelism;

use crate::config::{ConfigLayer, extract};
use crate::error::{ConfigError, Result};
use crate::merge::MergeRules;

/// Effective build configuration
///
/// Every field has a default, so any subset of keys is a valid layer; see
/// [`ConfigLayer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default)]
    pub mode: Mode,

    /// Source map policy
    #[serde(default)]
    pub devtool: Devtool,

    /// Entry name → module path
    #[serde(default)]
    pub entry: IndexMap<String, String>,

    #[serde(default)]
    pub output: OutputOptions,

    #[serde(default)]
    pub resolve: ResolveOptions,

    #[serde(default)]
    pub module: ModuleOptions,

    #[serde(default)]
    pub optimization: Optimization,

    #[serde(default)]
    pub performance: Performance,

    /// Output plugins, run in order
    #[serde(default)]
    pub plugins: Vec<PluginSpec>,

    /// Upper bound on modules the engine processes concurrently
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            devtool: Devtool::default(),
            entry: IndexMap::new(),
            output: OutputOptions::default(),
            resolve: ResolveOptions::default(),
            module: ModuleOptions::default(),
            optimization: Optimization::default(),
            performance: Performance::default(),
            plugins: Vec::new(),
            parallelism: default_parallelism(),
        }
    }
}

impl BuildConfig {
    /// Create from serde_json::Value, rejecting unknown keys and mistyped
    /// values with their key path.
    ///
    /// # Example
    ///
    /// ```
    /// use packrat_config::{BuildConfig, Mode};
    /// use serde_json::json;
    ///
    /// let config = BuildConfig::from_value(json!({
    ///     "mode": "development",
    ///     "performance": { "maxAssetSize": 100000 }
    /// }))
    /// .unwrap();
    /// assert_eq!(config.mode, Mode::Development);
    /// assert_eq!(config.performance.max_asset_size, 100_000);
    ///
    /// let err = BuildConfig::from_value(json!({
    ///     "performance": { "maxAssetSize": "100kb" }
    /// }))
    /// .unwrap_err();
    /// assert_eq!(err.violation_paths(), vec!["performance.maxAssetSize"]);
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        extract(&value, "config")
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Merge an override layer on top of this configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use packrat_config::{BuildConfig, ConfigLayer, Mode};
    /// use serde_json::json;
    ///
    /// let base = BuildConfig::from_value(json!({"mode": "development"})).unwrap();
    /// let overrides = ConfigLayer::new("prod", json!({"mode": "production"})).unwrap();
    /// assert_eq!(base.merge(&overrides).unwrap().mode, Mode::Production);
    /// ```
    pub fn merge(&self, overlay: &ConfigLayer) -> Result<Self> {
        self.merge_with(overlay, &MergeRules::standard())
    }

    pub fn merge_with(&self, overlay: &ConfigLayer, rules: &MergeRules) -> Result<Self> {
        let base = ConfigLayer::from_config("config", self)?;
        base.merged(overlay, rules).resolve()
    }

    /// Whether output is minified: the explicit flag, else on in production.
    pub fn effective_minimize(&self) -> bool {
        self.optimization
            .minimize
            .unwrap_or(self.mode == Mode::Production)
    }

    /// Whether any plugin of the given kind (`"mini-css-extract"`, ...) is configured.
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|plugin| plugin.name() == name)
    }

    pub fn css_extract(&self) -> Option<&CssExtractOptions> {
        self.plugins.iter().find_map(|plugin| match plugin {
            PluginSpec::MiniCssExtract(options) => Some(options),
            _ => None,
        })
    }
}
