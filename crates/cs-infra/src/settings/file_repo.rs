use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use cs_core::ports::SettingsPort;
use cs_core::settings::{Settings, CURRENT_SCHEMA_VERSION};

use crate::settings::migration::SettingsMigrator;

/// JSON settings file with schema migration on load.
///
/// The file is only ever replaced whole, through a `.json.tmp` sibling and
/// a rename, so a crash mid-write leaves the previous version readable.
pub struct FileSettingsRepository {
    path: PathBuf,
}

impl FileSettingsRepository {
    /// Repository over the settings file at `path`. Nothing is touched on
    /// disk until the first [`load`](SettingsPort::load) or
    /// [`save`](SettingsPort::save).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cs_infra::FileSettingsRepository;
    ///
    /// let repo = FileSettingsRepository::new("/tmp/clipsync/settings.json");
    /// assert!(repo.path().ends_with("settings.json"));
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates every missing directory above the settings file.
    ///
    /// # Errors
    ///
    /// Context `create settings dir failed: <dir>` when creation fails.
    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create settings dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Writes to a temporary sibling, then renames over the target.
    ///
    /// # Errors
    ///
    /// Directory creation, the temp write or the rename failed. A failed
    /// rename can leave the `.json.tmp` file behind; the target is intact.
    async fn atomic_write(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp settings failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp settings to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl SettingsPort for FileSettingsRepository {
    /// Reads, parses and migrates the settings file.
    ///
    /// # Returns
    ///
    /// - [`Settings::default`] when the file does not exist (nothing is written)
    /// - the migrated settings when the file has an older `schema_version`;
    ///   the migrated form is saved back before returning
    /// - the parsed settings otherwise
    ///
    /// Values are not validated here; callers apply
    /// [`validate_settings`](cs_core::settings::validate_settings).
    ///
    /// # Errors
    ///
    /// The file exists but cannot be read or parsed, no migration path
    /// exists from its schema, or writing back the migrated form failed.
    async fn load(&self) -> Result<Settings> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read settings failed: {}", self.path.display()))
            }
        };

        let settings: Settings = serde_json::from_str(&content)
            .with_context(|| format!("parse settings failed: {}", self.path.display()))?;
        let original_version = settings.schema_version;
        let migrated = SettingsMigrator::new().migrate_to_latest(settings)?;

        if original_version < CURRENT_SCHEMA_VERSION {
            self.save(&migrated).await?;
        }

        Ok(migrated)
    }

    /// Replaces the file with pretty-printed JSON.
    async fn save(&self, settings: &Settings) -> Result<()> {
        let content =
            serde_json::to_string_pretty(settings).context("serialize settings failed")?;

        self.atomic_write(&content).await
    }
}
