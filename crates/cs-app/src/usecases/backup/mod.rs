//! Backup use cases: export/import, the backup history, automatic backups.

mod history;
mod scheduler;
mod transfer;

pub use history::{GetBackupHistory, RunBackup, BACKUP_HISTORY_KEY};
pub use scheduler::{AutoBackupScheduler, RunAutoBackup, AUTO_BACKUP_CHECK_INTERVAL};
pub use transfer::{ExportBackup, ImportBackup, ImportReport};
