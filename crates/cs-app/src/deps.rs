//! # Application Dependencies
//!
//! Dependency grouping for [`crate::App`] construction. This is not a
//! builder: no defaults, no hidden logic, every port is required.

use std::sync::Arc;

use cs_core::ports::{
    BackupTargetPort, ClockPort, KeyValueStorePort, RemoteChannelPort, SettingsMigratorPort,
    SettingsPort,
};

pub struct AppDeps {
    // Storage: the item store and the backup history share it
    pub kv: Arc<dyn KeyValueStorePort>,
    pub backup_target: Arc<dyn BackupTargetPort>,

    // Settings
    pub settings: Arc<dyn SettingsPort>,
    pub migrator: Arc<dyn SettingsMigratorPort>,

    // Sync
    pub remote: Arc<dyn RemoteChannelPort>,

    // System
    pub clock: Arc<dyn ClockPort>,
}
