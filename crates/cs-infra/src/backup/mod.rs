//! Backup files: pretty JSON [`BackupDocument`]s on disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use cs_core::backup::BackupDocument;
use cs_core::error::StoreError;
use cs_core::ports::BackupTargetPort;

/// Default file name, e.g. `clipsync-backup-2024-05-01-000000.json`.
pub fn backup_file_name(document: &BackupDocument) -> String {
    format!(
        "clipsync-backup-{}.json",
        document.export_date.format("%Y-%m-%d-%H%M%S")
    )
}

/// Writes each backup as [`backup_file_name`] inside one directory.
pub struct DirectoryBackupTarget {
    dir: PathBuf,
}

impl DirectoryBackupTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl BackupTargetPort for DirectoryBackupTarget {
    async fn write(&self, document: &BackupDocument) -> Result<String> {
        let path = self.dir.join(backup_file_name(document));
        write_backup_file(&path, document).await?;
        Ok(path.display().to_string())
    }
}

pub async fn write_backup_file(path: &Path, document: &BackupDocument) -> Result<()> {
    let content = serde_json::to_string_pretty(document).context("serialize backup failed")?;

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("create backup dir failed: {}", dir.display()))?;
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content)
        .await
        .with_context(|| format!("write backup failed: {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("rename backup failed: {}", path.display()))?;

    info!(path = %path.display(), items = document.items.len(), "Backup written");
    Ok(())
}

/// Reads a backup. Content that does not parse is reported as
/// [`StoreError::MalformedInput`].
pub async fn read_backup_file(path: &Path) -> Result<BackupDocument> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("read backup failed: {}", path.display()))?;

    let document = serde_json::from_str(&content)
        .map_err(|e| StoreError::MalformedInput(e.to_string()))
        .with_context(|| format!("parse backup failed: {}", path.display()))?;
    Ok(document)
}
