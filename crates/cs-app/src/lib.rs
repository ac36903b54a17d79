//! clipsync application layer
//!
//! Use cases orchestrating the domain in `cs-core` over the ports that
//! `cs-infra` implements. The item store is the single owner of the
//! history; everything else reaches it through [`SharedItemStore`].

pub mod deps;
pub mod store;
pub mod usecases;

use std::sync::{Arc, Mutex};

use cs_core::sync::SyncStatus;

pub use deps::AppDeps;
pub use store::{lock_store, ItemStore, SharedItemStore};
pub use usecases::sync::{lock_status, SyncStatusHandle};

use usecases::{
    AutoBackupScheduler, CaptureClipboard, ComputeStatistics, ExportBackup, GetBackupHistory,
    GetRecommendations, GetSettings, ImportBackup, PullRemoteItems, PushLocalItems,
    ResolveConflict, RunAutoBackup, RunBackup, RunSyncCycle, UpdateSettings,
};

/// Wired application: shared state plus use case accessors.
pub struct App {
    deps: AppDeps,
    store: SharedItemStore,
    sync_status: SyncStatusHandle,
}

impl App {
    pub fn new(deps: AppDeps, store: SharedItemStore) -> Self {
        Self {
            deps,
            store,
            sync_status: Arc::new(Mutex::new(SyncStatus::default())),
        }
    }

    pub fn store(&self) -> &SharedItemStore {
        &self.store
    }

    pub fn sync_status(&self) -> anyhow::Result<SyncStatus> {
        Ok(lock_status(&self.sync_status)?.clone())
    }

    pub fn capture_clipboard(&self) -> CaptureClipboard {
        CaptureClipboard::new(self.store.clone(), self.deps.settings.clone())
    }

    pub fn run_sync_cycle(&self) -> RunSyncCycle {
        RunSyncCycle::new(
            self.store.clone(),
            self.deps.remote.clone(),
            self.deps.settings.clone(),
            self.deps.clock.clone(),
            self.sync_status.clone(),
        )
    }

    pub fn pull_remote_items(&self) -> PullRemoteItems {
        PullRemoteItems::new(
            self.store.clone(),
            self.deps.remote.clone(),
            self.deps.clock.clone(),
            self.sync_status.clone(),
        )
    }

    pub fn push_local_items(&self) -> PushLocalItems {
        PushLocalItems::new(self.store.clone(), self.deps.remote.clone())
    }

    pub fn resolve_conflict(&self) -> ResolveConflict {
        ResolveConflict::new(
            self.store.clone(),
            self.deps.remote.clone(),
            self.deps.clock.clone(),
            self.sync_status.clone(),
        )
    }

    pub fn compute_statistics(&self) -> ComputeStatistics {
        ComputeStatistics::new(self.store.clone(), self.deps.clock.clone())
    }

    pub fn get_recommendations(&self) -> GetRecommendations {
        GetRecommendations::new(self.store.clone(), self.deps.clock.clone())
    }

    pub fn export_backup(&self) -> ExportBackup {
        ExportBackup::new(self.store.clone(), self.deps.settings.clone(), self.deps.clock.clone())
    }

    pub fn import_backup(&self) -> ImportBackup {
        ImportBackup::new(
            self.store.clone(),
            self.deps.settings.clone(),
            self.deps.migrator.clone(),
        )
    }

    pub fn run_backup(&self) -> RunBackup {
        RunBackup::new(
            self.export_backup(),
            self.deps.backup_target.clone(),
            self.deps.kv.clone(),
        )
    }

    pub fn run_auto_backup(&self) -> RunAutoBackup {
        RunAutoBackup::new(
            self.run_backup(),
            self.deps.settings.clone(),
            self.deps.kv.clone(),
            self.deps.clock.clone(),
        )
    }

    pub fn auto_backup_scheduler(&self) -> AutoBackupScheduler {
        AutoBackupScheduler::new(self.run_auto_backup())
    }

    pub fn backup_history(&self) -> GetBackupHistory {
        GetBackupHistory::new(self.deps.kv.clone())
    }

    pub fn get_settings(&self) -> GetSettings {
        GetSettings::new(self.deps.settings.clone())
    }

    pub fn update_settings(&self) -> UpdateSettings {
        UpdateSettings::new(self.deps.settings.clone(), self.store.clone())
    }
}

#[cfg(test)]
pub(crate) mod test_support;
