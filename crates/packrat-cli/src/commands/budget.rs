//! Budget command implementation.
//!
//! Measures an emitted build against `performance.maxAssetSize` and
//! `performance.maxEntrypointSize`.

use packrat_config::{
    AssetSize, BuildConfig, ChunkFilter, EntrypointAssets, FilenameTemplate, PerformanceHints,
};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::cli::BudgetArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the budget command.
///
/// # Errors
///
/// Returns [`CliError::BudgetExceeded`] when `performance.hints` is `error`
/// and any asset or entrypoint is over its limit.
pub fn execute(args: BudgetArgs) -> Result<()> {
    let config = utils::load_config(&args.config)?;
    let root = utils::project_root(&args.config)?;
    let dir = match &args.dir {
        Some(dir) => utils::resolve_path(dir, &utils::get_cwd()?),
        None => utils::resolve_path(&config.output.path, &root),
    };
    if !dir.is_dir() {
        return Err(CliError::FileNotFound(dir));
    }

    let assets = measure_assets(&dir)?;
    let entrypoints = entrypoint_assets(&config, &assets)?;
    debug!(dir = %dir.display(), assets = assets.len(), entrypoints = entrypoints.len(), "measured build output");

    let report = config.performance.evaluate(&assets, &entrypoints);
    ui::print_budget_report(&assets, &report);

    match report.severity {
        PerformanceHints::Off => {
            ui::warning("performance hints are disabled; budgets are not enforced");
            return Ok(());
        }
        PerformanceHints::Warning => report
            .violations
            .iter()
            .for_each(|violation| ui::warning(&violation.to_string())),
        PerformanceHints::Error => report
            .violations
            .iter()
            .for_each(|violation| ui::error(&violation.to_string())),
    }

    if report.is_failure() {
        return Err(CliError::BudgetExceeded {
            count: report.violations.len(),
        });
    }
    if report.violations.is_empty() {
        ui::success(&format!(
            "All assets within budget (asset {}, entrypoint {})",
            ui::format_size(config.performance.max_asset_size),
            ui::format_size(config.performance.max_entrypoint_size)
        ));
    }
    Ok(())
}

/// Every file under `dir`, named by its `/`-separated path relative to `dir`.
pub fn measure_assets(dir: &Path) -> Result<Vec<AssetSize>> {
    let mut assets = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        let name = relative
            .components()
            .map(|part| part.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        assets.push(AssetSize {
            name,
            size: entry.metadata()?.len(),
        });
    }
    Ok(assets)
}

/// Assets loaded up front by each configured entry.
///
/// An entrypoint owns the files its output and stylesheet templates produce
/// for its own name and for every named cache group that splits initial
/// chunks.
pub fn entrypoint_assets(config: &BuildConfig, assets: &[AssetSize]) -> Result<Vec<EntrypointAssets>> {
    let mut templates = vec![FilenameTemplate::new(&config.output.filename)];
    if let Some(css) = config.css_extract() {
        templates.push(css.filename_template());
    }

    let split = &config.optimization.split_chunks;
    let shared: Vec<&str> = split
        .cache_groups
        .iter()
        .filter(|(_, group)| split.chunks_for(group) != ChunkFilter::Async)
        .map(|(key, group)| group.name.as_deref().unwrap_or(key.as_str()))
        .collect();

    let mut entrypoints = Vec::with_capacity(config.entry.len());
    for name in config.entry.keys() {
        let mut matchers = Vec::new();
        for template in &templates {
            matchers.push(template.matcher(name)?);
            for chunk in &shared {
                matchers.push(template.matcher(chunk)?);
            }
        }

        let owned = assets
            .iter()
            .filter(|asset| matchers.iter().any(|m| m.is_match(&asset.name)))
            .map(|asset| asset.name.clone())
            .collect();
        entrypoints.push(EntrypointAssets {
            name: name.clone(),
            assets: owned,
        });
    }
    Ok(entrypoints)
}
