use anyhow::{anyhow, Result};
use tracing::info;

use cs_core::ports::{SettingsMigrationPort, SettingsMigratorPort};
use cs_core::settings::{Settings, CURRENT_SCHEMA_VERSION, DEFAULT_HISTORY_LIMIT};

/// v1 files allowed `history.limit = 0` for "unlimited"; v2 requires a bound.
pub struct MigrationV1ToV2;

impl SettingsMigrationPort for MigrationV1ToV2 {
    fn from_version(&self) -> u32 {
        1
    }

    fn to_version(&self) -> u32 {
        2
    }

    fn migrate(&self, mut settings: Settings) -> Settings {
        if settings.history.limit == 0 {
            settings.history.limit = DEFAULT_HISTORY_LIMIT;
        }
        settings.schema_version = self.to_version();
        settings
    }
}

/// Applies registered [`SettingsMigrationPort`] steps one version at a time.
pub struct SettingsMigrator {
    migrations: Vec<Box<dyn SettingsMigrationPort>>,
}

impl Default for SettingsMigrator {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsMigrator {
    pub fn new() -> Self {
        Self {
            migrations: vec![Box::new(MigrationV1ToV2)],
        }
    }

    /// Runs every step from `settings.schema_version` up to
    /// [`CURRENT_SCHEMA_VERSION`]. Current or newer settings pass through.
    ///
    /// # Errors
    ///
    /// Fails when no step starts at one of the intermediate versions.
    pub fn migrate_to_latest(&self, mut settings: Settings) -> Result<Settings> {
        loop {
            let current = settings.schema_version;

            if current >= CURRENT_SCHEMA_VERSION {
                break;
            }

            let migration = self
                .migrations
                .iter()
                .find(|m| m.from_version() == current)
                .ok_or_else(|| anyhow!("no settings migration from version {current}"))?;

            settings = migration.migrate(settings);
            info!(
                from = current,
                to = settings.schema_version,
                "Migrated settings schema"
            );
        }

        Ok(settings)
    }
}

impl SettingsMigratorPort for SettingsMigrator {
    fn migrate_to_latest(&self, settings: Settings) -> Result<Settings> {
        SettingsMigrator::migrate_to_latest(self, settings)
    }
}
