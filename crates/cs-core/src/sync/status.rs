use serde::{Deserialize, Serialize};

use super::ConflictPair;

/// Snapshot of the sync loop, exposed to presentation layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub auto_sync_enabled: bool,
    /// unix epoch millis of the last successful cycle, 0 if never
    pub last_sync_ms: i64,
    pub cycles: u64,
    pub pending_conflicts: Vec<ConflictPair>,
    pub last_error: Option<String>,
}
