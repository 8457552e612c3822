use crate::settings::config::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the default settings path (~/.workscope/settings.toml)
pub fn default_settings_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to get home directory")?;
    Ok(home.join(".workscope").join("settings.toml"))
}

/// Load settings from a TOML file. A missing file yields the defaults and
/// nothing is written back; a file that fails to parse is an error.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        tracing::debug!("No settings at {path:?}, using defaults");
        return Ok(Settings::default());
    }

    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read settings from {path:?}"))?;

    let settings: Settings = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse settings from {path:?}"))?;

    tracing::info!(
        root = %settings.root.display(),
        patterns = settings.ignore.patterns.len(),
        "Loaded settings from {path:?}"
    );
    Ok(settings)
}

/// JSON schema of the settings file, for editors and documentation.
pub fn settings_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(Settings);
    serde_json::to_value(schema).unwrap_or_default()
}
