//! Built-in override layers.
//!
//! `production` is the override set applied on top of a project's base
//! configuration for release builds. `development` relaxes it for local
//! iteration.

use serde_json::json;

use crate::build::CSS_EXTRACT_LOADER;
use crate::config::ConfigLayer;
use crate::error::{ConfigError, Result};

/// Names accepted by [`lookup`]
pub const PRESETS: &[&str] = &["production", "development"];

/// Production overrides: minified, split, CSS extracted, budgets raised to
/// 512000 bytes with hints off, one module at a time.
pub fn production() -> ConfigLayer {
    ConfigLayer::trusted(
        "preset:production",
        json!({
            "mode": "production",
            "devtool": false,
            "module": {
                "rules": [
                    {
                        "test": r"\.css$",
                        "use": [CSS_EXTRACT_LOADER, "css-loader"]
                    }
                ]
            },
            "optimization": {
                "minimize": true,
                "minimizer": [
                    {
                        "plugin": "terser",
                        "parallel": false,
                        "terserOptions": {
                            "compress": { "drop_console": false },
                            "mangle": true
                        }
                    }
                ],
                "splitChunks": {
                    "chunks": "all",
                    "maxSize": 244000,
                    "cacheGroups": {
                        "vendor": {
                            "test": r"[\\/]node_modules[\\/]",
                            "name": "vendors",
                            "priority": 10
                        }
                    }
                }
            },
            "performance": {
                "hints": false,
                "maxEntrypointSize": 512000,
                "maxAssetSize": 512000
            },
            "plugins": [
                {
                    "plugin": "mini-css-extract",
                    "filename": "styles/[name].[contenthash].css",
                    "chunkFilename": "styles/[id].[contenthash].css"
                }
            ],
            "parallelism": 1
        }),
    )
}

/// Development overrides: readable output with cheap source maps.
pub fn development() -> ConfigLayer {
    ConfigLayer::trusted(
        "preset:development",
        json!({
            "mode": "development",
            "devtool": "eval-cheap-module-source-map",
            "optimization": {
                "minimize": false
            },
            "performance": {
                "hints": false
            }
        }),
    )
}

pub fn lookup(name: &str) -> Result<ConfigLayer> {
    match name {
        "production" | "prod" => Ok(production()),
        "development" | "dev" => Ok(development()),
        other => Err(ConfigError::UnknownPreset(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{
        BuildConfig, ChunkFilter, Devtool, MinimizerSpec, Mode, PerformanceHints, PluginSpec,
        WorkerParallelism,
    };

    #[test]
    fn presets_satisfy_the_schema() {
        for name in PRESETS {
            let preset = lookup(name).unwrap();
            ConfigLayer::new(preset.origin(), preset.value().clone()).unwrap();
        }
    }

    #[test]
    fn production_preset_resolves_to_release_settings() {
        let config = production().resolve().unwrap();

        assert_eq!(config.mode, Mode::Production);
        assert_eq!(config.devtool, Devtool::Off);
        assert_eq!(config.parallelism, 1);
        assert!(config.effective_minimize());
        assert_eq!(config.performance.hints, PerformanceHints::Off);
        assert_eq!(config.performance.max_entrypoint_size, 512_000);
        assert_eq!(config.performance.max_asset_size, 512_000);

        let split = &config.optimization.split_chunks;
        assert_eq!(split.chunks, ChunkFilter::All);
        assert_eq!(split.max_size, Some(244_000));
        let (name, vendor) = split.group_for("/app/node_modules/react/index.js").unwrap();
        assert_eq!(name, "vendor");
        assert_eq!(vendor.name.as_deref(), Some("vendors"));
        assert_eq!(vendor.priority, 10);

        match config.optimization.minimizer.as_slice() {
            [MinimizerSpec::Terser(terser)] => {
                assert_eq!(terser.parallel, WorkerParallelism::Enabled(false));
                assert!(!terser.terser_options.compress.drop_console);
                assert!(terser.terser_options.mangle);
            }
            other => panic!("unexpected minimizers: {other:?}"),
        }

        let loaders: Vec<_> = config
            .module
            .pipeline_for("src/app.css")
            .into_iter()
            .map(|entry| entry.loader())
            .collect();
        assert_eq!(loaders, vec!["css-loader", CSS_EXTRACT_LOADER]);

        match config.plugins.as_slice() {
            [PluginSpec::MiniCssExtract(css)] => {
                assert_eq!(css.filename, "styles/[name].[contenthash].css");
                assert_eq!(css.chunk_filename.as_deref(), Some("styles/[id].[contenthash].css"));
            }
            other => panic!("unexpected plugins: {other:?}"),
        }
    }

    #[test]
    fn development_preset_keeps_source_maps() {
        let config = BuildConfig::default().merge(&development()).unwrap();
        assert_eq!(config.mode, Mode::Development);
        assert!(config.devtool.emits_source_maps());
        assert!(!config.effective_minimize());
    }

    #[test]
    fn unknown_preset_is_an_error() {
        assert!(matches!(lookup("staging"), Err(ConfigError::UnknownPreset(name)) if name == "staging"));
    }
}
