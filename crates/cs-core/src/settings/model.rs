use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Capacity bound of the item store. 0 only appears in v1 files.
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Skip automatic capture of content that looks like a credential.
    pub exclude_secrets: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    pub auto_sync: bool,
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSettings {
    /// Write a backup file on its own once `frequency` has elapsed.
    pub auto_backup: bool,
    pub frequency: BackupFrequency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub history: HistorySettings,

    #[serde(default)]
    pub capture: CaptureSettings,

    #[serde(default)]
    pub sync: SyncSettings,

    #[serde(default)]
    pub backup: BackupSettings,
}

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}
