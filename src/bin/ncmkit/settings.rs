use crate::error::{CliError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Persisted defaults for `dump`; command-line flags take precedence.
pub struct Settings {
    /// Directory for decoded files (default: next to the input).
    pub output_dir: Option<PathBuf>,
    /// Also write the embedded cover image.
    pub cover: bool,
    /// Overwrite existing output files.
    pub overwrite: bool,
}

impl Settings {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => load_from(path),
            None => load_from(&config_path()?),
        }
    }
}

/// Missing or blank file means defaults; unknown keys are rejected.
fn load_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings = toml::from_str(&raw)?;
    Ok(settings)
}

/// `~/.ncmkit/config.toml`, or `%LOCALAPPDATA%\ncmkit\config.toml` on Windows.
fn config_path() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let base = std::env::var_os("LOCALAPPDATA")
            .or_else(|| std::env::var_os("APPDATA"))
            .ok_or_else(|| CliError::Message("LOCALAPPDATA/APPDATA not set".to_string()))?;
        let mut path = PathBuf::from(base);
        path.push("ncmkit");
        path.push("config.toml");
        Ok(path)
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home =
            std::env::var_os("HOME").ok_or_else(|| CliError::Message("HOME not set".to_string()))?;
        let mut path = PathBuf::from(home);
        path.push(".ncmkit");
        path.push("config.toml");
        Ok(path)
    }
}
