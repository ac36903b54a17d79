use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "clipsync";

/// Platform data directory for clipsync.
///
/// - macOS: ~/Library/Application Support/clipsync
/// - Windows: %APPDATA%\clipsync
/// - Linux: $XDG_DATA_HOME/clipsync or ~/.local/share/clipsync
///
/// Does not create the directory.
pub fn app_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Unable to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

/// Default location of the startup TOML config.
pub fn app_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Unable to get platform config directory")?;
    Ok(base.join(APP_DIR_NAME).join("config.toml"))
}

pub fn backups_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("backups")
}

pub fn items_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("items")
}

pub fn logs_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rooted_in_data_dir() {
        let root = Path::new("/data/clipsync");
        assert_eq!(items_dir(root), root.join("items"));
        assert_eq!(backups_dir(root), root.join("backups"));
        assert_eq!(logs_dir(root), root.join("logs"));
        assert_eq!(settings_path(root), root.join("settings.json"));
    }
}
