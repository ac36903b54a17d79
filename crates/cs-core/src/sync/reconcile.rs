use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::clip::ClipItem;
use crate::ids::ClipId;

/// Same id on both sides, neither strictly newer, different content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictPair {
    pub local: ClipItem,
    pub remote: ClipItem,
}

impl ConflictPair {
    pub fn id(&self) -> &ClipId {
        &self.local.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    pub merged: Vec<ClipItem>,
    pub conflicts: Vec<ConflictPair>,
}

/// Merges a remote list into a local one by id, newest timestamp wins.
///
/// Rules per remote item:
/// - unknown id: appended
/// - remote strictly newer: replaces the local entry
/// - otherwise, different content: local kept, pair reported as a conflict
/// - otherwise: no-op
///
/// The result is stable-sorted by timestamp, newest first, so ties keep
/// local-before-remote order. Nothing is dropped and re-running with the
/// merged list as `local` yields the same list.
pub fn reconcile(local: &[ClipItem], remote: &[ClipItem]) -> MergeOutcome {
    let mut merged: Vec<ClipItem> = local.to_vec();
    let mut index: HashMap<ClipId, usize> = merged
        .iter()
        .enumerate()
        .map(|(pos, item)| (item.id.clone(), pos))
        .collect();
    let mut conflicts = Vec::new();

    for remote_item in remote {
        match index.get(&remote_item.id) {
            None => {
                index.insert(remote_item.id.clone(), merged.len());
                merged.push(remote_item.clone());
            }
            Some(&pos) => {
                let local_item = &merged[pos];
                if remote_item.timestamp > local_item.timestamp {
                    merged[pos] = remote_item.clone();
                } else if remote_item.content != local_item.content {
                    conflicts.push(ConflictPair {
                        local: local_item.clone(),
                        remote: remote_item.clone(),
                    });
                }
            }
        }
    }

    merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    #[cfg(feature = "tracing")]
    tracing::debug!(
        local = local.len(),
        remote = remote.len(),
        merged = merged.len(),
        conflicts = conflicts.len(),
        "reconciled item lists"
    );

    MergeOutcome { merged, conflicts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipType;

    fn item(id: &str, ts: i64, content: &str) -> ClipItem {
        ClipItem::new(content, ClipType::Text, vec![], ts).with_id(ClipId::from(id))
    }

    #[test]
    fn newer_remote_replaces_local() {
        let out = reconcile(&[item("1", 10, "a")], &[item("1", 20, "b")]);
        assert_eq!(out.merged.len(), 1);
        assert_eq!(out.merged[0].content, "b");
        assert!(out.conflicts.is_empty());
    }

    #[test]
    fn equal_timestamp_different_content_is_a_conflict() {
        let out = reconcile(&[item("1", 10, "a")], &[item("1", 10, "b")]);
        assert_eq!(out.merged[0].content, "a");
        assert_eq!(out.conflicts.len(), 1);
        assert_eq!(out.conflicts[0].local.content, "a");
        assert_eq!(out.conflicts[0].remote.content, "b");
    }

    #[test]
    fn newer_local_with_different_content_is_reported() {
        let out = reconcile(&[item("1", 30, "a")], &[item("1", 10, "b")]);
        assert_eq!(out.merged[0].content, "a");
        assert_eq!(out.conflicts.len(), 1);
    }

    #[test]
    fn identical_items_are_a_no_op() {
        let local = vec![item("1", 10, "a")];
        let out = reconcile(&local, &local);
        assert_eq!(out.merged, local);
        assert!(out.conflicts.is_empty());
    }

    #[test]
    fn unknown_remote_items_are_appended_and_sorted() {
        let out = reconcile(
            &[item("1", 10, "a"), item("2", 5, "b")],
            &[item("3", 7, "c"), item("4", 1, "d")],
        );
        let ids: Vec<&str> = out.merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn ties_keep_local_before_remote() {
        let out = reconcile(&[item("1", 10, "a")], &[item("2", 10, "b")]);
        let ids: Vec<&str> = out.merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let local = vec![item("1", 10, "a"), item("2", 30, "b"), item("5", 12, "e")];
        let remote = vec![item("1", 20, "a2"), item("3", 15, "c"), item("5", 12, "zz")];

        let first = reconcile(&local, &remote);
        let second = reconcile(&first.merged, &remote);

        assert_eq!(second.merged, first.merged);
        assert_eq!(second.conflicts, first.conflicts);
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let local = vec![item("1", 10, "a"), item("2", 10, "b")];
        let remote = vec![item("3", 10, "c"), item("2", 10, "x")];
        assert_eq!(reconcile(&local, &remote), reconcile(&local, &remote));
    }
}
