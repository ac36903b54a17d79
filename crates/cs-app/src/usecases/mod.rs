//! Business logic use cases.
//!
//! A use case exists where a user or the system makes a decision:
//! capturing, syncing, resolving a conflict, exporting, importing.

pub mod backup;
pub mod capture;
pub mod settings;
pub mod statistics;
pub mod sync;

pub use backup::{
    AutoBackupScheduler, ExportBackup, GetBackupHistory, ImportBackup, ImportReport,
    RunAutoBackup, RunBackup,
};
pub use capture::{CaptureClipboard, CaptureOutcome, IgnoreReason};
pub use settings::{GetSettings, UpdateSettings};
pub use statistics::{ComputeStatistics, GetRecommendations};
pub use sync::{
    PullRemoteItems, PushLocalItems, ResolveConflict, RunSyncCycle, SyncMode, SyncReport,
    SyncScheduler,
};
