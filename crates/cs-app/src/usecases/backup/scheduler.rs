use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use cs_core::backup::{should_auto_backup, BackupRecord};
use cs_core::ports::{ClockPort, KeyValueStorePort, SettingsPort};

use super::history::{load_history, RunBackup};

/// How often [`AutoBackupScheduler`] asks whether a backup is due.
pub const AUTO_BACKUP_CHECK_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Writes a backup when `backup.auto_backup` is on and the configured
/// frequency has elapsed since the newest recorded backup.
pub struct RunAutoBackup {
    backup: RunBackup,
    settings: Arc<dyn SettingsPort>,
    kv: Arc<dyn KeyValueStorePort>,
    clock: Arc<dyn ClockPort>,
}

impl RunAutoBackup {
    pub fn new(
        backup: RunBackup,
        settings: Arc<dyn SettingsPort>,
        kv: Arc<dyn KeyValueStorePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            backup,
            settings,
            kv,
            clock,
        }
    }

    /// Returns the new record, or `None` when no backup was due.
    #[tracing::instrument(name = "usecase.run_auto_backup.execute", skip(self))]
    pub async fn execute(&self) -> Result<Option<BackupRecord>> {
        let settings = self.settings.load().await.context("load settings")?;
        let last = load_history(self.kv.as_ref())?.latest().map(|r| r.timestamp);

        if !should_auto_backup(&settings.backup, last, self.clock.now_ms()) {
            debug!(?last, "Automatic backup not due");
            return Ok(None);
        }
        self.backup.execute().await.map(Some)
    }
}

/// Checks for a due automatic backup on a fixed interval until shutdown.
pub struct AutoBackupScheduler {
    auto_backup: RunAutoBackup,
    interval: Duration,
}

impl AutoBackupScheduler {
    pub fn new(auto_backup: RunAutoBackup) -> Self {
        Self::with_interval(auto_backup, AUTO_BACKUP_CHECK_INTERVAL)
    }

    pub fn with_interval(auto_backup: RunAutoBackup, interval: Duration) -> Self {
        Self {
            auto_backup,
            interval: interval.max(Duration::from_secs(1)),
        }
    }

    /// The first check runs immediately. Same shutdown contract as
    /// [`SyncScheduler::run`](crate::usecases::SyncScheduler::run).
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = self.interval.as_secs(), "Auto backup scheduler started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(err) = self.auto_backup.execute().await {
                        warn!(error = %err, "Automatic backup failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Auto backup scheduler stopped");
    }
}
