//! Formatting for sizes and command reports.

use console::Term;
use owo_colors::OwoColorize;

use packrat_config::{AssetSize, BudgetReport, BudgetSubject, CacheGroup, UseEntry};

use crate::ui::colors_enabled;

/// Format file size in human-readable format.
///
/// # Examples
///
/// ```
/// use packrat_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;
    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{bytes} {}", UNITS[0])
    } else {
        format!("{size:.2} {}", UNITS[unit_idx])
    }
}

fn rule() -> String {
    let width = Term::stdout().size().1 as usize;
    "─".repeat(width.clamp(20, 80))
}

/// Print every measured asset, flagging those over budget, then the
/// entrypoint violations.
pub fn print_budget_report(assets: &[AssetSize], report: &BudgetReport) {
    let color = colors_enabled();
    let title = "Asset sizes";
    if color {
        println!("{}", title.bold().underline());
    } else {
        println!("{title}");
    }
    println!("{}", rule());

    for asset in assets {
        let over = report
            .violations
            .iter()
            .any(|v| matches!(&v.subject, BudgetSubject::Asset(name) if name == &asset.name));
        let size = format_size(asset.size);
        match (color, over) {
            (true, true) => println!("  {} {} {}", "▸".red(), asset.name.red().bold(), size.red()),
            (true, false) => println!("  {} {} {}", "▸".blue(), asset.name, size.dimmed()),
            (false, true) => println!("  ! {} {size}", asset.name),
            (false, false) => println!("    {} {size}", asset.name),
        }
    }

    println!("{}", rule());
    let total: u64 = assets.iter().map(|asset| asset.size).sum();
    println!("  Total: {} in {} file(s)", format_size(total), assets.len());

    for violation in &report.violations {
        if let BudgetSubject::Entrypoint(_) = violation.subject {
            println!("  {violation}");
        }
    }
}

/// Print the loader pipeline and cache group chosen for `module`.
pub fn print_explanation(
    module: &str,
    pipeline: &[&UseEntry],
    group: Option<(&str, &CacheGroup)>,
) {
    println!("{module}");

    if pipeline.is_empty() {
        println!("  loaders: none (no rule matches)");
    } else {
        println!("  loaders (execution order):");
        for (index, entry) in pipeline.iter().enumerate() {
            match entry {
                UseEntry::Detailed(spec) if !spec.options.is_null() => {
                    println!("    {}. {} {}", index + 1, spec.loader, spec.options)
                }
                _ => println!("    {}. {}", index + 1, entry.loader()),
            }
        }
    }

    match group {
        Some((key, group)) => {
            let chunk = group.name.as_deref().unwrap_or(key);
            println!(
                "  cache group: {key} (chunk `{chunk}`, priority {})",
                group.priority
            );
        }
        None => println!("  cache group: none"),
    }
}
