//! Record of written backups and the automatic backup schedule.

use serde::{Deserialize, Serialize};

use crate::settings::{BackupFrequency, BackupSettings};

/// Records kept, newest first.
pub const BACKUP_HISTORY_LIMIT: usize = 50;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

impl BackupFrequency {
    pub fn interval_ms(self) -> i64 {
        match self {
            BackupFrequency::Daily => DAY_MS,
            BackupFrequency::Weekly => 7 * DAY_MS,
            BackupFrequency::Monthly => 30 * DAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRecord {
    /// Epoch milliseconds of the write.
    pub timestamp: i64,
    /// Where the adapter put the file.
    pub location: String,
    pub item_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackupHistory {
    records: Vec<BackupRecord>,
}

impl BackupHistory {
    pub fn records(&self) -> &[BackupRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&BackupRecord> {
        self.records.first()
    }

    /// Puts `record` first and drops the oldest beyond
    /// [`BACKUP_HISTORY_LIMIT`].
    pub fn push(&mut self, record: BackupRecord) {
        self.records.insert(0, record);
        self.records.truncate(BACKUP_HISTORY_LIMIT);
    }
}

/// Whether an automatic backup is due at `now_ms`.
///
/// Never when disabled; always when nothing was backed up yet.
pub fn should_auto_backup(settings: &BackupSettings, last_backup_ms: Option<i64>, now_ms: i64) -> bool {
    if !settings.auto_backup {
        return false;
    }
    match last_backup_ms {
        None => true,
        Some(last) => now_ms - last >= settings.frequency.interval_ms(),
    }
}
