use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use cs_core::ports::{ClockPort, RemoteChannelPort};

use super::merge::merge_into_store;
use super::status::{lock_status, SyncStatusHandle};
use crate::store::SharedItemStore;

/// Fetches the remote list and merges it without pushing anything back.
pub struct PullRemoteItems {
    store: SharedItemStore,
    remote: Arc<dyn RemoteChannelPort>,
    clock: Arc<dyn ClockPort>,
    status: SyncStatusHandle,
}

impl PullRemoteItems {
    pub fn new(
        store: SharedItemStore,
        remote: Arc<dyn RemoteChannelPort>,
        clock: Arc<dyn ClockPort>,
        status: SyncStatusHandle,
    ) -> Self {
        Self {
            store,
            remote,
            clock,
            status,
        }
    }

    /// Returns the number of conflicts left pending.
    #[tracing::instrument(name = "usecase.pull_remote_items.execute", skip(self))]
    pub async fn execute(&self) -> Result<usize> {
        let remote = self
            .remote
            .fetch_items()
            .await
            .context("fetch remote items")?;
        let merged = merge_into_store(&self.store, &remote, self.clock.as_ref())?;
        let conflicts = merged.conflicts.len();

        lock_status(&self.status)?.pending_conflicts = merged.conflicts;
        info!(fetched = remote.len(), total = merged.items.len(), conflicts, "Pulled remote items");
        Ok(conflicts)
    }
}
