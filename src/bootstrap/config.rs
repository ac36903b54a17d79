//! # Configuration loader
//!
//! Reads the TOML file into the [`AppConfig`] DTO. No validation and no
//! defaulting of individual values: an empty string is a fact, and the
//! wiring decides what it means.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cs_core::config::AppConfig;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "CLIPSYNC_CONFIG";

/// Reads and maps one TOML file.
///
/// # Errors
/// - the file cannot be read
/// - the content is not valid TOML
/// - a value has an impossible type or sign
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Where the startup config is read from.
///
/// # Returns
///
/// `$CLIPSYNC_CONFIG` when it is set and non-empty, otherwise the platform
/// location from [`cs_infra::fs::app_config_path`]
/// (e.g. `~/.config/clipsync/config.toml` on Linux). The file may not exist.
///
/// # Errors
///
/// The platform has no config directory and the variable is unset.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => cs_infra::fs::app_config_path(),
    }
}

/// Like [`load_config`], but a missing file yields an empty config.
///
/// # Examples
///
/// ```ignore
/// let path = resolve_config_path()?;
/// let config = load_config_or_default(&path)?;
/// run_app(config)?;
/// ```
pub fn load_config_or_default(config_path: &Path) -> anyhow::Result<AppConfig> {
    if config_path.exists() {
        load_config(config_path)
    } else {
        Ok(AppConfig::empty())
    }
}
