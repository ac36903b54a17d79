use super::model::*;

pub const DEFAULT_HISTORY_LIMIT: usize = 500;
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 30;

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            exclude_secrets: true,
        }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            auto_sync: true,
            interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
        }
    }
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            auto_backup: false,
            frequency: BackupFrequency::Daily,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            history: HistorySettings::default(),
            capture: CaptureSettings::default(),
            sync: SyncSettings::default(),
            backup: BackupSettings::default(),
        }
    }
}
