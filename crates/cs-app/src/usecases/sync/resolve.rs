use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use cs_core::clip::ClipItem;
use cs_core::ids::ClipId;
use cs_core::ports::{ClockPort, RemoteChannelPort};
use cs_core::sync::{resolve_conflict, ConflictResolution};

use super::status::{lock_status, SyncStatusHandle};
use crate::store::{lock_store, SharedItemStore};

/// Applies the user's decision to a conflict reported by a sync cycle.
///
/// ## Behavior
/// - `KeepLocal`: the local item is pushed so the remote side converges
/// - `KeepRemote`: the local item is replaced by the remote version
/// - `KeepBoth`: the remote version is added as a new item and both are pushed
///
/// Returns `false` when no pending conflict has that id, or when the local
/// item is gone; the pending entry is dropped in the latter case.
pub struct ResolveConflict {
    store: SharedItemStore,
    remote: Arc<dyn RemoteChannelPort>,
    clock: Arc<dyn ClockPort>,
    status: SyncStatusHandle,
}

impl ResolveConflict {
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

    #[tracing::instrument(
        name = "usecase.resolve_conflict.execute",
        skip(self),
        fields(id = %id)
    )]
    pub async fn execute(&self, id: &ClipId, resolution: ConflictResolution) -> Result<bool> {
        let pair = {
            let status = lock_status(&self.status)?;
            match status.pending_conflicts.iter().find(|p| p.id() == id) {
                Some(pair) => pair.clone(),
                None => return Ok(false),
            }
        };

        let outgoing: Option<Vec<ClipItem>> = {
            let mut store = lock_store(&self.store)?;
            match resolve_conflict(store.all(), &pair, resolution, self.clock.now_ms()) {
                Some(outcome) => {
                    store
                        .replace_all(outcome.items)
                        .context("commit conflict resolution")?;
                    Some(
                        store
                            .all()
                            .iter()
                            .filter(|item| outcome.needs_push.contains(&item.id))
                            .cloned()
                            .collect(),
                    )
                }
                None => None,
            }
        };

        let resolved = match outgoing {
            Some(items) => {
                if !items.is_empty() {
                    self.remote
                        .push_items(&items)
                        .await
                        .context("push resolved items")?;
                }
                true
            }
            None => false,
        };

        lock_status(&self.status)?
            .pending_conflicts
            .retain(|p| p.id() != id);

        info!(?resolution, resolved, "Conflict handled");
        Ok(resolved)
    }
}
