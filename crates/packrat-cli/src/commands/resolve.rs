//! Resolve command implementation.
//!
//! Prints the effective build configuration in the engine's schema.

use packrat_config::BuildConfig;
use std::fs;

use crate::cli::{OutputFormat, ResolveArgs};
use crate::commands::utils;
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the resolve command.
///
/// # Errors
///
/// Returns errors for missing or invalid configuration, or when the output
/// file cannot be written.
pub fn execute(args: ResolveArgs) -> Result<()> {
    let config = utils::load_config(&args.config)?;
    let rendered = render(&config, args.format)?;

    match &args.out {
        Some(path) => {
            let path = utils::resolve_path(path, &utils::get_cwd()?);
            fs::write(&path, rendered).with_path(&path)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Serialize the configuration, ending with a newline.
pub fn render(config: &BuildConfig, format: OutputFormat) -> Result<String> {
    let value = config.to_value()?;
    let mut rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&value)?,
        OutputFormat::Toml => toml::to_string_pretty(&value)?,
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use packrat_config::presets;

    fn production() -> BuildConfig {
        BuildConfig::default().merge(&presets::production()).unwrap()
    }

    #[test]
    fn json_round_trips_through_the_loader() {
        let config = production();
        let json = render(&config, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(BuildConfig::from_value(parsed).unwrap(), config);
    }

    #[test]
    fn toml_output_is_a_valid_config_file() {
        let config = production();
        let toml = render(&config, OutputFormat::Toml).unwrap();
        let file = packrat_config::ConfigFile::from_toml_str("resolved.toml", &toml).unwrap();
        assert_eq!(file.layer.resolve().unwrap(), config);
    }
}
