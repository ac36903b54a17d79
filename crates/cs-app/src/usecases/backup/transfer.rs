//! Export and import of the whole history as a [`BackupDocument`].

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::DateTime;
use tracing::info;

use cs_core::backup::{BackupDocument, BACKUP_FORMAT_VERSION};
use cs_core::ports::{ClockPort, SettingsMigratorPort, SettingsPort};
use cs_core::settings::validate_settings;

use crate::store::{lock_store, SharedItemStore};

pub struct ExportBackup {
    store: SharedItemStore,
    settings: Arc<dyn SettingsPort>,
    clock: Arc<dyn ClockPort>,
}

impl ExportBackup {
    pub fn new(store: SharedItemStore, settings: Arc<dyn SettingsPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            store,
            settings,
            clock,
        }
    }

    #[tracing::instrument(name = "usecase.export_backup.execute", skip(self))]
    pub async fn execute(&self, include_settings: bool) -> Result<BackupDocument> {
        let settings = if include_settings {
            Some(self.settings.load().await.context("load settings")?)
        } else {
            None
        };

        let now_ms = self.clock.now_ms();
        let export_date = DateTime::from_timestamp_millis(now_ms)
            .ok_or_else(|| anyhow!("clock returned an out-of-range timestamp: {now_ms}"))?;

        let items = lock_store(&self.store)?.all().to_vec();
        info!(items = items.len(), include_settings, "Exporting backup");
        Ok(BackupDocument::new(items, settings, export_date))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub items: usize,
    pub settings_restored: bool,
}

/// Replaces the history (and settings, when present) with a backup.
///
/// The document is validated first, including its settings after they
/// were migrated to the current schema. A rejected document changes
/// nothing. Restored settings take effect on the store together with the
/// items, so the new history limit bounds the import.
pub struct ImportBackup {
    store: SharedItemStore,
    settings: Arc<dyn SettingsPort>,
    migrator: Arc<dyn SettingsMigratorPort>,
}

impl ImportBackup {
    pub fn new(
        store: SharedItemStore,
        settings: Arc<dyn SettingsPort>,
        migrator: Arc<dyn SettingsMigratorPort>,
    ) -> Self {
        Self {
            store,
            settings,
            migrator,
        }
    }

    #[tracing::instrument(name = "usecase.import_backup.execute", skip(self, document))]
    pub async fn execute(&self, document: BackupDocument) -> Result<ImportReport> {
        if major(&document.version) != major(BACKUP_FORMAT_VERSION) {
            bail!(
                "unsupported backup version {}, expected {}",
                document.version,
                BACKUP_FORMAT_VERSION
            );
        }
        document.validate().context("backup item list rejected")?;

        let restored = match document.settings {
            Some(settings) => {
                let settings = self
                    .migrator
                    .migrate_to_latest(settings)
                    .context("migrate backup settings")?;
                validate_settings(&settings).context("backup settings rejected")?;
                Some(settings)
            }
            None => None,
        };

        let items = {
            let mut store = lock_store(&self.store)?;
            match &restored {
                Some(settings) => store
                    .replace_all_with_capacity(document.items, settings.history.limit)
                    .context("restore backup items")?,
                None => store
                    .replace_all(document.items)
                    .context("restore backup items")?,
            }
            store.len()
        };

        let settings_restored = restored.is_some();
        if let Some(settings) = restored {
            self.settings
                .save(&settings)
                .await
                .context("restore backup settings")?;
        }

        info!(items, settings_restored, "Backup imported");
        Ok(ImportReport {
            items,
            settings_restored,
        })
    }
}

fn major(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_core::clip::{ClipItem, ClipType};
    use cs_core::ids::ClipId;
    use cs_core::settings::{Settings, DEFAULT_HISTORY_LIMIT};
    use cs_infra::settings::SettingsMigrator;

    use crate::test_support::{settings_returning, shared_store, MockSettingsStore, TestClock};

    fn importer(store: SharedItemStore, port: MockSettingsStore) -> ImportBackup {
        ImportBackup::new(store, Arc::new(port), Arc::new(SettingsMigrator::new()))
    }

    fn three_items() -> Vec<ClipItem> {
        vec![
            ClipItem::new("one", ClipType::Text, vec![], 30),
            ClipItem::new("two", ClipType::Text, vec![], 20),
            ClipItem::new("three", ClipType::Text, vec![], 10),
        ]
    }

    #[tokio::test]
    async fn export_carries_items_and_settings() {
        let store = shared_store(10);
        lock_store(&store)
            .unwrap()
            .upsert("saved", ClipType::Text, vec![])
            .unwrap();

        let uc = ExportBackup::new(
            store,
            Arc::new(settings_returning(Settings::default())),
            TestClock::starting_at(1_700_000_000_000),
        );
        let doc = uc.execute(true).await.unwrap();

        assert_eq!(doc.version, BACKUP_FORMAT_VERSION);
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.settings, Some(Settings::default()));
        assert_eq!(doc.export_date.timestamp_millis(), 1_700_000_000_000);
    }

    #[tokio::test]
    async fn import_replaces_store() {
        let store = shared_store(10);
        lock_store(&store)
            .unwrap()
            .upsert("old", ClipType::Text, vec![])
            .unwrap();

        let mut port = MockSettingsStore::new();
        port.expect_save().never();
        let doc = BackupDocument::new(
            vec![
                ClipItem::new("restored 1", ClipType::Text, vec![], 20),
                ClipItem::new("restored 2", ClipType::Text, vec![], 10),
            ],
            None,
            DateTime::from_timestamp(0, 0).unwrap(),
        );

        let report = importer(store.clone(), port)
            .execute(doc)
            .await
            .unwrap();
        assert_eq!(
            report,
            ImportReport {
                items: 2,
                settings_restored: false
            }
        );
        assert_eq!(lock_store(&store).unwrap().all()[0].content, "restored 1");
    }

    #[tokio::test]
    async fn invalid_backup_changes_nothing() {
        let store = shared_store(10);
        lock_store(&store)
            .unwrap()
            .upsert("old", ClipType::Text, vec![])
            .unwrap();

        let dup = ClipId::from("same");
        let doc = BackupDocument::new(
            vec![
                ClipItem::new("a", ClipType::Text, vec![], 2).with_id(dup.clone()),
                ClipItem::new("b", ClipType::Text, vec![], 1).with_id(dup),
            ],
            None,
            DateTime::from_timestamp(0, 0).unwrap(),
        );

        let result = importer(store.clone(), MockSettingsStore::new())
            .execute(doc)
            .await;
        assert!(result.is_err());
        assert_eq!(lock_store(&store).unwrap().all()[0].content, "old");
    }

    #[tokio::test]
    async fn future_major_version_is_rejected() {
        let mut doc = BackupDocument::new(vec![], None, DateTime::from_timestamp(0, 0).unwrap());
        doc.version = "2.0.0".to_string();

        let result = importer(shared_store(10), MockSettingsStore::new())
            .execute(doc)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn restored_limit_bounds_the_import_not_the_current_one() {
        let store = shared_store(2);

        let mut settings = Settings::default();
        settings.history.limit = 10;
        let mut port = MockSettingsStore::new();
        port.expect_save()
            .withf(|s: &Settings| s.history.limit == 10)
            .times(1)
            .returning(|_| Ok(()));

        let doc = BackupDocument::new(
            three_items(),
            Some(settings),
            DateTime::from_timestamp(0, 0).unwrap(),
        );
        let report = importer(store.clone(), port).execute(doc).await.unwrap();

        assert_eq!(
            report,
            ImportReport {
                items: 3,
                settings_restored: true
            }
        );
        let store = lock_store(&store).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.capacity(), 10);
    }

    #[tokio::test]
    async fn v1_settings_are_migrated_before_they_apply() {
        let store = shared_store(2);

        let mut v1 = Settings::default();
        v1.schema_version = 1;
        v1.history.limit = 0;
        let mut port = MockSettingsStore::new();
        port.expect_save()
            .withf(|s: &Settings| s.schema_version == 2 && s.history.limit == DEFAULT_HISTORY_LIMIT)
            .times(1)
            .returning(|_| Ok(()));

        let doc = BackupDocument::new(three_items(), Some(v1), DateTime::from_timestamp(0, 0).unwrap());
        importer(store.clone(), port).execute(doc).await.unwrap();

        let store = lock_store(&store).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.capacity(), DEFAULT_HISTORY_LIMIT);
    }

    #[tokio::test]
    async fn zero_limit_in_current_schema_is_rejected_before_any_change() {
        let store = shared_store(10);
        lock_store(&store)
            .unwrap()
            .upsert("old", ClipType::Text, vec![])
            .unwrap();

        let mut settings = Settings::default();
        settings.history.limit = 0;
        let mut port = MockSettingsStore::new();
        port.expect_save().never();

        let doc = BackupDocument::new(three_items(), Some(settings), DateTime::from_timestamp(0, 0).unwrap());
        assert!(importer(store.clone(), port).execute(doc).await.is_err());

        let store = lock_store(&store).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].content, "old");
        assert_eq!(store.capacity(), 10);
    }
}
