//! Tests for configuration validation.

use packrat_config::{
    BuildConfig, ConfigError, ConfigLoader, ConfigValidator, FsValidator, SchemaValidator,
    validate_schema,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn production_preset_passes_validation() {
    let dir = TempDir::new().expect("tempdir");
    let config = ConfigLoader::new(dir.path())
        .preset("production")
        .env(false)
        .load()
        .expect("load");
    assert!(SchemaValidator.validate(&config).is_ok());
}

#[test]
fn validate_catches_missing_entry() {
    let dir = TempDir::new().expect("tempdir");
    let mut config = BuildConfig::default();
    config.entry.insert("main".into(), "src/nonexistent.js".into());

    match FsValidator::new(dir.path()).validate(&config).unwrap_err() {
        ConfigError::EntryNotFound { name, path } => {
            assert_eq!(name, "main");
            assert!(path.ends_with("src/nonexistent.js"));
        }
        other => panic!("expected EntryNotFound error, got {other:?}"),
    }
}

#[test]
fn validate_catches_missing_html_template() {
    let dir = TempDir::new().expect("tempdir");
    let config = BuildConfig::from_value(json!({
        "plugins": [{"plugin": "html", "template": "public/index.html"}]
    }))
    .expect("config");

    let err = FsValidator::new(dir.path()).validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "plugins.0.template"));

    fs::create_dir(dir.path().join("public")).expect("mkdir");
    fs::write(dir.path().join("public/index.html"), "<html></html>").expect("write");
    assert!(FsValidator::new(dir.path()).validate(&config).is_ok());
}

#[test]
fn fs_validator_runs_schema_checks_first() {
    let dir = TempDir::new().expect("tempdir");
    let mut config = BuildConfig::default();
    config.performance.max_asset_size = 0;

    let err = FsValidator::new(dir.path()).validate(&config).unwrap_err();
    assert_eq!(err.violation_paths(), vec!["performance.maxAssetSize"]);
}

#[test]
fn extract_loader_is_valid_once_the_plugin_is_merged_in() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("packrat.toml"),
        r#"
[[module.rules]]
test = '\.s[ac]ss$'
use = ["mini-css-extract-plugin/loader", "css-loader", "sass-loader"]
"#,
    )
    .expect("write config");

    let base = ConfigLoader::new(dir.path()).env(false).load().expect("base");
    assert_eq!(validate_schema(&base).unwrap_err().violation_paths(), vec!["module.rules.0.use"]);

    let production = ConfigLoader::new(dir.path())
        .preset("production")
        .env(false)
        .load()
        .expect("production");
    assert!(validate_schema(&production).is_ok());
}

#[test]
fn schema_errors_render_every_path() {
    let config = BuildConfig::from_value(json!({
        "parallelism": 0,
        "performance": {"maxEntrypointSize": 0}
    }))
    .expect("config");

    let message = validate_schema(&config).unwrap_err().to_string();
    assert!(message.contains("parallelism: must be at least 1"));
    assert!(message.contains("performance.maxEntrypointSize"));
}
