use std::collections::HashMap;
use std::sync::Mutex;

use cs_core::error::KvError;
use cs_core::ports::KeyValueStorePort;

/// Process-local store, optionally bounded per value like browser storage.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
    quota_bytes: Option<u64>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }
}

impl KeyValueStorePort for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let values = self
            .values
            .lock()
            .map_err(|_| KvError::Io("in-memory store lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        if let Some(quota) = self.quota_bytes {
            if value.len() as u64 > quota {
                return Err(KvError::QuotaExceeded);
            }
        }
        let mut values = self
            .values
            .lock()
            .map_err(|_| KvError::Io("in-memory store lock poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| KvError::Io("in-memory store lock poisoned".into()))?;
        values.remove(key);
        Ok(())
    }
}
