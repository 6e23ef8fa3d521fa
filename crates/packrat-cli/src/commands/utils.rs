//! Shared utilities for command implementations.

use packrat_config::{BuildConfig, ConfigLoader};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::ConfigArgs;
use crate::error::{CliError, Result};

/// Resolve a path relative to a working directory.
///
/// If the path is absolute, returns it unchanged. Otherwise, joins it with
/// the working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the current working directory.
///
/// # Errors
///
/// Returns I/O error if current directory cannot be determined.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {e}"),
        ))
    })
}

/// The project root selected by `--cwd`, else the current directory.
pub fn project_root(args: &ConfigArgs) -> Result<PathBuf> {
    let cwd = get_cwd()?;
    Ok(match &args.cwd {
        Some(dir) => resolve_path(dir, &cwd),
        None => cwd,
    })
}

/// Build the layered loader described by the shared config flags.
pub fn loader(args: &ConfigArgs) -> Result<ConfigLoader> {
    let root = project_root(args)?;
    let mut loader = ConfigLoader::new(&root).env(!args.no_env);

    if let Some(file) = &args.config {
        loader = loader.file(resolve_path(file, &get_cwd()?));
    }
    if args.preset != "none" {
        loader = loader.preset(&args.preset);
    }
    if let Some(profile) = &args.profile {
        loader = loader.profile(profile);
    }

    debug!(root = %root.display(), preset = %args.preset, profile = ?args.profile, "configuration selectors");
    Ok(loader)
}

/// Load, merge and resolve the configuration selected by the shared flags.
pub fn load_config(args: &ConfigArgs) -> Result<BuildConfig> {
    Ok(loader(args)?.load()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_absolute() {
        let cwd = Path::new("/project");
        let abs = Path::new("/etc/packrat.toml");
        assert_eq!(resolve_path(abs, cwd), PathBuf::from("/etc/packrat.toml"));
    }

    #[test]
    fn test_resolve_path_relative() {
        let cwd = Path::new("/project");
        assert_eq!(
            resolve_path(Path::new("configs/web.toml"), cwd),
            PathBuf::from("/project/configs/web.toml")
        );
    }

    #[test]
    fn test_get_cwd() {
        assert!(get_cwd().unwrap().is_absolute());
    }
}
