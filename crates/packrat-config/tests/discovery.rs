//! Tests for config file discovery and loading

use packrat_config::{ConfigDiscovery, ConfigError, ConfigLoader, Mode, load_file};
use std::fs;
use tempfile::TempDir;

#[test]
fn discovers_packrat_toml() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("packrat.toml"),
        r#"
mode = "development"
parallelism = 8

[entry]
main = "./src/index.js"
"#,
    )
    .unwrap();

    let discovery = ConfigDiscovery::new(dir.path());
    let found = discovery.find().unwrap();
    assert_eq!(found.file_name().unwrap(), "packrat.toml");

    let config = discovery.load().unwrap().layer.resolve().unwrap();
    assert_eq!(config.mode, Mode::Development);
    assert_eq!(config.parallelism, 8);
    assert_eq!(config.entry["main"], "./src/index.js");
}

#[test]
fn discovers_packrat_json() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("packrat.json"),
        r#"{"mode": "none", "output": {"path": "out"}}"#,
    )
    .unwrap();

    let config = ConfigDiscovery::new(dir.path())
        .load()
        .unwrap()
        .layer
        .resolve()
        .unwrap();
    assert_eq!(config.mode, Mode::None);
    assert_eq!(config.output.path.to_str(), Some("out"));
}

#[test]
fn discovers_package_json() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
  "name": "test",
  "packrat": {
    "mode": "development",
    "performance": { "maxAssetSize": 100000 }
  }
}"#,
    )
    .unwrap();

    let discovery = ConfigDiscovery::new(dir.path());
    let found = discovery.find().unwrap();
    assert_eq!(found.file_name().unwrap(), "package.json");

    let config = discovery.load().unwrap().layer.resolve().unwrap();
    assert_eq!(config.performance.max_asset_size, 100_000);
}

#[test]
fn toml_takes_precedence_over_package_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("packrat.toml"), r#"mode = "none""#).unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"packrat": {"mode": "development"}}"#,
    )
    .unwrap();

    let config = ConfigDiscovery::new(dir.path())
        .load()
        .unwrap()
        .layer
        .resolve()
        .unwrap();
    assert_eq!(config.mode, Mode::None);
}

#[test]
fn unknown_key_in_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("packrat.toml");
    fs::write(
        &path,
        r#"
[optimization.splitChunks]
chunks = "all"
maxSzie = 244000
"#,
    )
    .unwrap();

    let err = load_file(&path).unwrap_err();
    assert_eq!(err.violation_paths(), vec!["optimization.splitChunks.maxSzie"]);
    assert!(err.to_string().contains("packrat.toml"));
}

#[test]
fn string_size_threshold_is_rejected_at_load() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("packrat.toml"),
        r#"
[performance]
maxAssetSize = "512kb"
"#,
    )
    .unwrap();

    let err = ConfigLoader::new(dir.path()).env(false).load().unwrap_err();
    assert_eq!(err.violation_paths(), vec!["performance.maxAssetSize"]);
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("packrat.toml"), "mode = ").unwrap();

    let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn explicit_file_overrides_discovery() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("packrat.toml"), r#"mode = "none""#).unwrap();
    fs::create_dir(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join("config/release.json"),
        r#"{"mode": "development"}"#,
    )
    .unwrap();

    let config = ConfigLoader::new(dir.path())
        .file("config/release.json")
        .env(false)
        .load()
        .unwrap();
    assert_eq!(config.mode, Mode::Development);
}

#[test]
fn missing_explicit_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ConfigLoader::new(dir.path())
        .file("missing.toml")
        .env(false)
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn loader_keeps_cache_group_declaration_order() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("packrat.toml"),
        r#"
[optimization.splitChunks.cacheGroups.zeta]
test = "src"

[optimization.splitChunks.cacheGroups.alpha]
test = "src"
"#,
    )
    .unwrap();

    let config = ConfigLoader::new(dir.path()).env(false).load().unwrap();
    let (key, _) = config
        .optimization
        .split_chunks
        .group_for("/app/src/index.js")
        .unwrap();
    assert_eq!(key, "zeta");
}
