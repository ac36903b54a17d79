//! Use cases for reading and updating user settings.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, info_span, Instrument};

use cs_core::ports::SettingsPort;
use cs_core::settings::{validate_settings, Settings};

use crate::store::{lock_store, SharedItemStore};

pub struct GetSettings {
    settings: Arc<dyn SettingsPort>,
}

impl GetSettings {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self) -> Result<Settings> {
        let span = info_span!("usecase.get_settings.execute");

        async {
            let result = self.settings.load().await?;
            info!("Settings retrieved");
            Ok(result)
        }
        .instrument(span)
        .await
    }
}

/// Validates and persists settings, then applies the history limit to the
/// live store.
pub struct UpdateSettings {
    settings: Arc<dyn SettingsPort>,
    store: SharedItemStore,
}

impl UpdateSettings {
    pub fn new(settings: Arc<dyn SettingsPort>, store: SharedItemStore) -> Self {
        Self { settings, store }
    }

    pub async fn execute(&self, settings: Settings) -> Result<()> {
        let span = info_span!("usecase.update_settings.execute");

        async {
            validate_settings(&settings).context("settings rejected")?;

            self.settings
                .save(&settings)
                .await
                .context("save settings")?;

            lock_store(&self.store)?
                .set_capacity(settings.history.limit)
                .context("apply history limit")?;

            info!(
                history_limit = settings.history.limit,
                auto_sync = settings.sync.auto_sync,
                "Settings updated"
            );
            Ok(())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_core::clip::ClipType;

    use crate::test_support::{shared_store, MockSettingsStore};

    #[tokio::test]
    async fn update_applies_history_limit() {
        let store = shared_store(10);
        {
            let mut guard = lock_store(&store).unwrap();
            for c in ["a", "b", "c"] {
                guard.upsert(c, ClipType::Text, vec![]).unwrap();
            }
        }

        let mut port = MockSettingsStore::new();
        port.expect_save()
            .withf(|s: &Settings| s.history.limit == 2)
            .times(1)
            .returning(|_| Ok(()));

        let mut settings = Settings::default();
        settings.history.limit = 2;
        UpdateSettings::new(Arc::new(port), store.clone())
            .execute(settings)
            .await
            .unwrap();

        let guard = lock_store(&store).unwrap();
        assert_eq!(guard.len(), 2);
        assert_eq!(guard.capacity(), 2);
    }

    #[tokio::test]
    async fn update_rejects_invalid_settings_before_saving() {
        let mut port = MockSettingsStore::new();
        port.expect_save().never();
        let uc = UpdateSettings::new(Arc::new(port), shared_store(10));

        let mut stale = Settings::default();
        stale.schema_version = 1;
        assert!(uc.execute(stale).await.is_err());

        let mut zero = Settings::default();
        zero.history.limit = 0;
        assert!(uc.execute(zero).await.is_err());
    }

    #[tokio::test]
    async fn get_returns_loaded_settings() {
        let mut port = MockSettingsStore::new();
        port.expect_load().returning(|| Ok(Settings::default()));
        let loaded = GetSettings::new(Arc::new(port)).execute().await.unwrap();
        assert_eq!(loaded, Settings::default());
    }
}
