//! User-editable settings persisted by the settings port.
pub mod defaults;
pub mod model;
pub mod validate;

pub use defaults::{DEFAULT_HISTORY_LIMIT, DEFAULT_SYNC_INTERVAL_SECS};
pub use model::{
    BackupFrequency, BackupSettings, CaptureSettings, HistorySettings, Settings, SyncSettings,
    CURRENT_SCHEMA_VERSION,
};
pub use validate::validate_settings;
