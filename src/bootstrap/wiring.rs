//! # Dependency wiring
//!
//! Turns the [`AppConfig`] facts into concrete adapters, opens the item
//! store, and hands everything to [`App`]. This is the only place that
//! interprets empty config values.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use cs_app::store::DEFAULT_ITEMS_KEY;
use cs_app::{App, AppDeps, ItemStore};
use cs_core::config::AppConfig;
use cs_core::ids::DeviceId;
use cs_core::ports::SettingsPort;
use cs_core::settings::validate_settings;
use cs_infra::fs::{app_data_dir, backups_dir, items_dir, settings_path};
use cs_infra::{
    DirectoryBackupTarget, FileKeyValueStore, FileSettingsRepository, InMemoryRemoteChannel,
    SettingsMigrator, SystemClock,
};

pub type WiringResult<T> = Result<T, WiringError>;

/// Infrastructure initialization failures.
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Data directory resolution failed: {0}")]
    DataDir(String),

    #[error("Settings repository initialization failed: {0}")]
    SettingsInit(String),

    #[error("Item store initialization failed: {0}")]
    StoreInit(String),
}

/// Everything the run loop needs after wiring.
pub struct WiredApp {
    pub app: App,
    pub data_dir: PathBuf,
    pub sync_interval: Duration,
}

/// Resolves the directory holding items, settings, backups and logs.
///
/// # Returns
///
/// `config.data_dir` when set, otherwise the platform data directory from
/// [`app_data_dir`]. Nothing is created.
///
/// # Errors
///
/// [`WiringError::DataDir`] when the platform has no data directory.
pub fn resolve_data_dir(config: &AppConfig) -> WiringResult<PathBuf> {
    if config.data_dir.as_os_str().is_empty() {
        app_data_dir().map_err(|e| WiringError::DataDir(format!("{e:#}")))
    } else {
        Ok(config.data_dir.clone())
    }
}

/// Builds every adapter and the [`App`] on top of them.
///
/// ## Steps
/// 1. Resolve the data directory
/// 2. Load settings (older schemas are migrated on load) and validate them
/// 3. Build the adapters into [`AppDeps`]
/// 4. Open the item store from `deps.kv` with the settings' history limit
///
/// Empty config values fall back to settings or built-in defaults:
/// `items_key` to `clipsync_items`, `sync_interval_secs = 0` to
/// `sync.interval_secs`, `device_name` to no device id.
///
/// # Errors
///
/// - [`WiringError::SettingsInit`] when the settings file cannot be read,
///   migrated, or fails validation (e.g. a zero history limit)
/// - [`WiringError::StoreInit`] when the stored history does not decode
///
/// # Examples
///
/// ```ignore
/// let config = AppConfig::with_system_defaults("/tmp/clipsync".into());
/// let wired = wire_dependencies(&config).await?;
/// let scheduler = SyncScheduler::new(wired.app.run_sync_cycle(), wired.sync_interval);
/// ```
pub async fn wire_dependencies(config: &AppConfig) -> WiringResult<WiredApp> {
    let data_dir = resolve_data_dir(config)?;

    let settings_repo = Arc::new(FileSettingsRepository::new(settings_path(&data_dir)));
    let settings = settings_repo
        .load()
        .await
        .map_err(|e| WiringError::SettingsInit(format!("{e:#}")))?;
    validate_settings(&settings).map_err(|e| WiringError::SettingsInit(e.to_string()))?;

    let deps = AppDeps {
        kv: Arc::new(FileKeyValueStore::new(items_dir(&data_dir)).with_quota(config.quota_bytes)),
        backup_target: Arc::new(DirectoryBackupTarget::new(backups_dir(&data_dir))),
        settings: settings_repo,
        migrator: Arc::new(SettingsMigrator::new()),
        remote: Arc::new(InMemoryRemoteChannel::new()),
        clock: Arc::new(SystemClock),
    };

    let items_key = if config.items_key.is_empty() {
        DEFAULT_ITEMS_KEY
    } else {
        config.items_key.as_str()
    };

    let mut store = ItemStore::open(
        deps.kv.clone(),
        deps.clock.clone(),
        items_key,
        settings.history.limit,
    )
    .map_err(|e| WiringError::StoreInit(e.to_string()))?;
    if !config.device_name.is_empty() {
        store = store.with_device(DeviceId::from(config.device_name.as_str()));
    }

    let sync_interval = Duration::from_secs(if config.sync_interval_secs > 0 {
        config.sync_interval_secs
    } else {
        settings.sync.interval_secs
    });

    info!(
        data_dir = %data_dir.display(),
        items = store.len(),
        capacity = store.capacity(),
        sync_interval_secs = sync_interval.as_secs(),
        "Dependencies wired"
    );

    Ok(WiredApp {
        app: App::new(deps, store.into_shared()),
        data_dir,
        sync_interval,
    })
}
