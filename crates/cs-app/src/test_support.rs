//! Port doubles shared by the use case unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;

use cs_core::backup::BackupDocument;
use cs_core::clip::ClipItem;
use cs_core::error::KvError;
use cs_core::ports::{
    BackupTargetPort, ClockPort, KeyValueStorePort, RemoteChannelPort, SettingsPort,
};
use cs_core::settings::Settings;

use crate::store::{ItemStore, SharedItemStore, DEFAULT_ITEMS_KEY};

mock! {
    pub Remote {}

    #[async_trait]
    impl RemoteChannelPort for Remote {
        async fn fetch_items(&self) -> anyhow::Result<Vec<ClipItem>>;
        async fn push_items(&self, items: &[ClipItem]) -> anyhow::Result<()>;
    }
}

mock! {
    pub SettingsStore {}

    #[async_trait]
    impl SettingsPort for SettingsStore {
        async fn load(&self) -> anyhow::Result<Settings>;
        async fn save(&self, settings: &Settings) -> anyhow::Result<()>;
    }
}

mock! {
    pub BackupTarget {}

    #[async_trait]
    impl BackupTargetPort for BackupTarget {
        async fn write(&self, document: &BackupDocument) -> anyhow::Result<String>;
    }
}

/// Settings mock that always loads `settings`.
pub fn settings_returning(settings: Settings) -> MockSettingsStore {
    let mut mock = MockSettingsStore::new();
    mock.expect_load().returning(move || Ok(settings.clone()));
    mock
}

/// Clock that advances one millisecond per reading.
pub struct TestClock(AtomicI64);

impl TestClock {
    pub fn starting_at(ms: i64) -> Arc<Self> {
        Arc::new(Self(AtomicI64::new(ms)))
    }
}

impl ClockPort for TestClock {
    fn now_ms(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

/// Map-backed key-value store that rejects values longer than `max_len`.
#[derive(Default)]
pub struct TestKv {
    values: Mutex<HashMap<String, String>>,
    max_len: Option<usize>,
    pub sets: AtomicUsize,
}

impl TestKv {
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len: Some(max_len),
            ..Default::default()
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

impl KeyValueStorePort for TestKv {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if let Some(max) = self.max_len {
            if value.len() > max {
                return Err(KvError::QuotaExceeded);
            }
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

pub fn shared_store(capacity: usize) -> SharedItemStore {
    ItemStore::open(
        Arc::new(TestKv::default()),
        TestClock::starting_at(1_000),
        DEFAULT_ITEMS_KEY,
        capacity,
    )
    .unwrap()
    .into_shared()
}
