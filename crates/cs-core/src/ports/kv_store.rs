use crate::error::KvError;

/// Synchronous string key-value persistence, bounded by an external quota.
///
/// Implementations must make `set` all-or-nothing: after an error the
/// previous value stays readable.
pub trait KeyValueStorePort: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    fn set(&self, key: &str, value: &str) -> Result<(), KvError>;

    fn remove(&self, key: &str) -> Result<(), KvError>;
}
