use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use cs_core::ports::{ClockPort, RemoteChannelPort, SettingsPort};
use cs_core::sync::changed_since;

use super::merge::merge_into_store;
use super::status::{lock_status, SyncStatusHandle};
use crate::store::SharedItemStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Timer-driven; honors `sync.auto_sync`.
    Scheduled,
    /// User-requested; runs even with auto sync off.
    Forced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncReport {
    Skipped,
    Completed {
        merged: usize,
        conflicts: usize,
        pushed: usize,
    },
}

/// One pull-merge-push round against the remote channel.
///
/// ## Steps
/// 1. Skip when auto sync is off, unless forced
/// 2. Fetch and validate the remote list
/// 3. Reconcile and replace the local list under the store lock
/// 4. Push items touched since the last successful cycle
/// 5. Record the cycle in the shared [`SyncStatus`](cs_core::sync::SyncStatus)
///
/// The next cycle's push threshold is the clock reading taken in step 3,
/// so items captured while step 4 is in flight go out next time.
///
/// Dropping the future before step 3 leaves the store untouched.
pub struct RunSyncCycle {
    store: SharedItemStore,
    remote: Arc<dyn RemoteChannelPort>,
    settings: Arc<dyn SettingsPort>,
    clock: Arc<dyn ClockPort>,
    status: SyncStatusHandle,
}

impl RunSyncCycle {
    pub fn new(
        store: SharedItemStore,
        remote: Arc<dyn RemoteChannelPort>,
        settings: Arc<dyn SettingsPort>,
        clock: Arc<dyn ClockPort>,
        status: SyncStatusHandle,
    ) -> Self {
        Self {
            store,
            remote,
            settings,
            clock,
            status,
        }
    }

    #[tracing::instrument(name = "usecase.run_sync_cycle.execute", skip(self))]
    pub async fn execute(&self, mode: SyncMode) -> Result<SyncReport> {
        let result = self.run(mode).await;
        if let Err(err) = &result {
            warn!(error = %err, "Sync cycle failed");
            lock_status(&self.status)?.last_error = Some(format!("{err:#}"));
        }
        result
    }

    async fn run(&self, mode: SyncMode) -> Result<SyncReport> {
        let settings = self.settings.load().await.context("load settings")?;
        lock_status(&self.status)?.auto_sync_enabled = settings.sync.auto_sync;

        if mode == SyncMode::Scheduled && !settings.sync.auto_sync {
            debug!("Auto sync disabled, skipping cycle");
            return Ok(SyncReport::Skipped);
        }

        let remote = self
            .remote
            .fetch_items()
            .await
            .context("fetch remote items")?;

        let last_sync_ms = lock_status(&self.status)?.last_sync_ms;
        let merged = merge_into_store(&self.store, &remote, self.clock.as_ref())?;

        let outgoing = changed_since(&merged.items, last_sync_ms);
        if !outgoing.is_empty() {
            self.remote
                .push_items(&outgoing)
                .await
                .context("push changed items")?;
        }

        let report = SyncReport::Completed {
            merged: merged.items.len(),
            conflicts: merged.conflicts.len(),
            pushed: outgoing.len(),
        };

        {
            let mut status = lock_status(&self.status)?;
            // A capture in the watermark's own millisecond is pushed again
            // next cycle instead of being skipped.
            status.last_sync_ms = merged.watermark_ms.saturating_sub(1);
            status.cycles += 1;
            status.pending_conflicts = merged.conflicts;
            status.last_error = None;
        }

        info!(?report, "Sync cycle completed");
        Ok(report)
    }
}
