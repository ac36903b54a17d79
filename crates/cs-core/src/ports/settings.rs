use anyhow::Result;
use async_trait::async_trait;

use crate::settings::model::Settings;

#[async_trait]
pub trait SettingsPort: Send + Sync {
    async fn load(&self) -> Result<Settings>;
    async fn save(&self, settings: &Settings) -> Result<()>;
}

pub trait SettingsMigrationPort: Send + Sync {
    fn from_version(&self) -> u32;
    fn to_version(&self) -> u32;
    fn migrate(&self, settings: Settings) -> Settings;
}

/// Brings settings written under any older schema up to the current one.
pub trait SettingsMigratorPort: Send + Sync {
    fn migrate_to_latest(&self, settings: Settings) -> Result<Settings>;
}
