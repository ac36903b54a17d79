use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;

use cs_core::sync::SyncStatus;

pub type SyncStatusHandle = Arc<Mutex<SyncStatus>>;

pub fn lock_status(status: &SyncStatusHandle) -> anyhow::Result<MutexGuard<'_, SyncStatus>> {
    status.lock().map_err(|_| anyhow!("sync status lock poisoned"))
}
