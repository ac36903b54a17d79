use thiserror::Error;

/// Failure of the backing key-value capability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KvError {
    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage io error: {0}")]
    Io(String),
}

/// Errors surfaced by the item store and list validation.
///
/// Unknown ids are not errors; lookups return `Option` or `bool`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Persisting failed even after evicting the oldest items.
    #[error("storage quota exceeded after eviction retry")]
    QuotaExceeded,

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("capacity must be at least 1")]
    ZeroCapacity,
}

impl From<KvError> for StoreError {
    fn from(err: KvError) -> Self {
        match err {
            KvError::QuotaExceeded => StoreError::QuotaExceeded,
            KvError::Io(msg) => StoreError::Storage(msg),
        }
    }
}

/// Settings that cannot be applied as they are.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid schema version: expected {expected}, got {found}")]
    SchemaVersion { expected: u32, found: u32 },

    #[error("history limit must be at least 1")]
    ZeroHistoryLimit,

    #[error("sync interval must be at least 1 second")]
    ZeroSyncInterval,
}
