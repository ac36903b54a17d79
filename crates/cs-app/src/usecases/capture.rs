//! Use case for recording a clipboard change.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use cs_core::classify::classify;
use cs_core::clip::{ClipItem, ClipType};
use cs_core::ports::SettingsPort;

use crate::store::{lock_store, SharedItemStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Empty,
    LikelySecret,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Stored(ClipItem),
    Ignored(IgnoreReason),
}

/// Classifies captured text and stores it in the history.
///
/// ## Behavior
/// - Whitespace-only content is ignored
/// - Likely secrets are ignored while `capture.exclude_secrets` is on
/// - The declared type wins; otherwise the type is detected from content
/// - Repeated content is promoted instead of duplicated
pub struct CaptureClipboard {
    store: SharedItemStore,
    settings: Arc<dyn SettingsPort>,
}

impl CaptureClipboard {
    pub fn new(store: SharedItemStore, settings: Arc<dyn SettingsPort>) -> Self {
        Self { store, settings }
    }

    #[tracing::instrument(
        name = "usecase.capture_clipboard.execute",
        skip(self, content, tags),
        fields(len = content.len())
    )]
    pub async fn execute(
        &self,
        content: &str,
        declared_type: Option<ClipType>,
        tags: Vec<String>,
    ) -> Result<CaptureOutcome> {
        if content.trim().is_empty() {
            debug!("Ignoring empty clipboard content");
            return Ok(CaptureOutcome::Ignored(IgnoreReason::Empty));
        }

        let settings = self.settings.load().await.context("load settings")?;
        let classification = classify(content);
        if settings.capture.exclude_secrets && classification.likely_secret {
            info!("Ignoring clipboard content that looks like a secret");
            return Ok(CaptureOutcome::Ignored(IgnoreReason::LikelySecret));
        }

        let clip_type = declared_type.unwrap_or(classification.clip_type);
        let item = lock_store(&self.store)?
            .upsert(content, clip_type, tags)
            .context("store captured item")?;

        info!(id = %item.id, clip_type = %item.clip_type, frequency = item.frequency, "Captured clipboard item");
        Ok(CaptureOutcome::Stored(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{settings_returning, shared_store};
    use cs_core::settings::Settings;

    fn capture(settings: Settings) -> (CaptureClipboard, SharedItemStore) {
        let store = shared_store(10);
        let uc = CaptureClipboard::new(store.clone(), Arc::new(settings_returning(settings)));
        (uc, store)
    }

    #[tokio::test]
    async fn blank_content_is_ignored() {
        let (uc, store) = capture(Settings::default());
        let outcome = uc.execute("  \n\t", None, vec![]).await.unwrap();
        assert_eq!(outcome, CaptureOutcome::Ignored(IgnoreReason::Empty));
        assert!(lock_store(&store).unwrap().is_empty());
    }

    #[tokio::test]
    async fn secrets_are_skipped_when_excluded() {
        let (uc, store) = capture(Settings::default());
        let outcome = uc.execute("mypassword123", None, vec![]).await.unwrap();
        assert_eq!(outcome, CaptureOutcome::Ignored(IgnoreReason::LikelySecret));
        assert!(lock_store(&store).unwrap().is_empty());
    }

    #[tokio::test]
    async fn secrets_are_kept_when_exclusion_is_off() {
        let mut settings = Settings::default();
        settings.capture.exclude_secrets = false;
        let (uc, store) = capture(settings);

        let outcome = uc.execute("mypassword123", None, vec![]).await.unwrap();
        assert!(matches!(outcome, CaptureOutcome::Stored(_)));
        assert_eq!(lock_store(&store).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn type_is_detected_unless_declared() {
        let (uc, _store) = capture(Settings::default());

        let CaptureOutcome::Stored(url) = uc.execute("https://example.com", None, vec![]).await.unwrap() else {
            panic!("url should be stored");
        };
        assert_eq!(url.clip_type, ClipType::Url);

        let CaptureOutcome::Stored(image) = uc
            .execute("screenshot 1", Some(ClipType::Image), vec![])
            .await
            .unwrap()
        else {
            panic!("image should be stored");
        };
        assert_eq!(image.clip_type, ClipType::Image);
    }

    #[tokio::test]
    async fn repeated_capture_bumps_frequency() {
        let (uc, store) = capture(Settings::default());
        uc.execute("hello world", None, vec![]).await.unwrap();
        uc.execute("hello world", None, vec![]).await.unwrap();

        let store = lock_store(&store).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].frequency, 2);
    }
}
