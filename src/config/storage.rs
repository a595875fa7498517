//! Loading and saving `autodeps.toml`.

use super::AutodepsConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Filename of the config at the repository root.
pub const CONFIG_FILE: &str = "autodeps.toml";

/// Get path to the config file for a repository.
pub fn config_path(repo_root: &Path) -> PathBuf {
    repo_root.join(CONFIG_FILE)
}

/// Load config from the repository root.
///
/// Returns the defaults if the file doesn't exist.
pub fn load_config(repo_root: &Path) -> Result<AutodepsConfig> {
    let path = config_path(repo_root);

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AutodepsConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path. The file must exist.
pub fn load_config_from(path: &Path) -> Result<AutodepsConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let config: AutodepsConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    config.validate()?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Write a config file to the repository root.
///
/// Refuses to overwrite an existing file.
pub fn save_config(repo_root: &Path, config: &AutodepsConfig) -> Result<PathBuf> {
    let path = config_path(repo_root);

    if path.exists() {
        return Err(Error::Config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;

    let content_with_header = format!(
        "# autodeps configuration\n# Missing keys fall back to built-in defaults\n\n{content}"
    );

    fs::write(&path, content_with_header)
        .map_err(|e| Error::Config(format!("failed to write {}: {e}", path.display())))?;

    Ok(path)
}
