use anyhow::{Context, Result};
use tracing::warn;

use cs_core::clip::ClipItem;
use cs_core::ports::ClockPort;
use cs_core::sync::{reconcile, validate_items, ConflictPair};

use crate::store::{lock_store, SharedItemStore};

pub(super) struct MergeResult {
    /// Store contents after the merge was committed.
    pub items: Vec<ClipItem>,
    pub conflicts: Vec<ConflictPair>,
    /// Clock reading taken under the store lock, before the merge.
    /// Anything touched later carries a timestamp at or above it.
    pub watermark_ms: i64,
}

/// Validates `remote`, then reconciles and commits it in one critical
/// section. Nothing is written if validation fails.
pub(super) fn merge_into_store(
    store: &SharedItemStore,
    remote: &[ClipItem],
    clock: &dyn ClockPort,
) -> Result<MergeResult> {
    validate_items(remote).context("remote item list rejected")?;

    let mut store = lock_store(store)?;
    let watermark_ms = clock.now_ms();
    let outcome = reconcile(store.all(), remote);
    store
        .replace_all(outcome.merged)
        .context("commit merged items")?;

    for pair in &outcome.conflicts {
        warn!(
            id = %pair.id(),
            local_ts = pair.local.timestamp,
            remote_ts = pair.remote.timestamp,
            "Sync conflict, local version kept"
        );
    }

    Ok(MergeResult {
        items: store.all().to_vec(),
        conflicts: outcome.conflicts,
        watermark_ms,
    })
}
