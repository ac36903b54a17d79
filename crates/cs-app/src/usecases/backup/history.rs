use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use cs_core::backup::{BackupHistory, BackupRecord};
use cs_core::error::StoreError;
use cs_core::ports::{BackupTargetPort, KeyValueStorePort};

use super::transfer::ExportBackup;

/// Key-value key holding the JSON list of [`BackupRecord`]s.
pub const BACKUP_HISTORY_KEY: &str = "clipsync_backup_history";

pub(super) fn load_history(kv: &dyn KeyValueStorePort) -> Result<BackupHistory> {
    match kv.get(BACKUP_HISTORY_KEY)? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| StoreError::MalformedInput(e.to_string()))
            .context("decode backup history"),
        None => Ok(BackupHistory::default()),
    }
}

fn save_history(kv: &dyn KeyValueStorePort, history: &BackupHistory) -> Result<()> {
    let raw = serde_json::to_string(history).context("encode backup history")?;
    kv.set(BACKUP_HISTORY_KEY, &raw)?;
    Ok(())
}

/// Backups written so far, newest first.
pub struct GetBackupHistory {
    kv: Arc<dyn KeyValueStorePort>,
}

impl GetBackupHistory {
    pub fn new(kv: Arc<dyn KeyValueStorePort>) -> Self {
        Self { kv }
    }

    pub fn execute(&self) -> Result<BackupHistory> {
        load_history(self.kv.as_ref())
    }
}

/// Exports items and settings to the backup target and records the write.
///
/// A failed write leaves the history unchanged.
pub struct RunBackup {
    export: ExportBackup,
    target: Arc<dyn BackupTargetPort>,
    kv: Arc<dyn KeyValueStorePort>,
}

impl RunBackup {
    pub fn new(
        export: ExportBackup,
        target: Arc<dyn BackupTargetPort>,
        kv: Arc<dyn KeyValueStorePort>,
    ) -> Self {
        Self { export, target, kv }
    }

    #[tracing::instrument(name = "usecase.run_backup.execute", skip(self))]
    pub async fn execute(&self) -> Result<BackupRecord> {
        let document = self.export.execute(true).await?;
        let location = self
            .target
            .write(&document)
            .await
            .context("write backup")?;

        let record = BackupRecord {
            timestamp: document.export_date.timestamp_millis(),
            location,
            item_count: document.items.len(),
        };

        let mut history = load_history(self.kv.as_ref())?;
        history.push(record.clone());
        save_history(self.kv.as_ref(), &history)?;

        info!(location = %record.location, items = record.item_count, "Backup recorded");
        Ok(record)
    }
}
