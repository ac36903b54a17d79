use serde::{Deserialize, Serialize};

use super::ConflictPair;
use crate::clip::ClipItem;
use crate::ids::ClipId;

/// Caller's decision for one reported conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictResolution {
    KeepLocal,
    KeepRemote,
    KeepBoth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    pub items: Vec<ClipItem>,
    /// Items whose local version must be pushed to the remote side.
    pub needs_push: Vec<ClipId>,
}

/// Applies a resolution to a list that still holds the conflicting local id.
///
/// Returns `None` if the local item is gone (deleted or evicted since the
/// conflict was reported).
pub fn resolve_conflict(
    items: &[ClipItem],
    pair: &ConflictPair,
    resolution: ConflictResolution,
    now_ms: i64,
) -> Option<ResolutionOutcome> {
    let pos = items.iter().position(|item| item.id == pair.local.id)?;
    let mut out = items.to_vec();

    let needs_push = match resolution {
        ConflictResolution::KeepLocal => vec![out[pos].id.clone()],
        ConflictResolution::KeepRemote => {
            out[pos] = pair.remote.clone();
            Vec::new()
        }
        ConflictResolution::KeepBoth => {
            let mut copy = pair.remote.clone().with_id(ClipId::new());
            copy.timestamp = now_ms.max(copy.timestamp);
            let new_id = copy.id.clone();
            out.insert(0, copy);
            vec![out[pos + 1].id.clone(), new_id]
        }
    };

    Some(ResolutionOutcome { items: out, needs_push })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipType;

    fn item(id: &str, ts: i64, content: &str) -> ClipItem {
        ClipItem::new(content, ClipType::Text, vec![], ts).with_id(ClipId::from(id))
    }

    fn pair() -> ConflictPair {
        ConflictPair {
            local: item("1", 10, "local"),
            remote: item("1", 10, "remote"),
        }
    }

    #[test]
    fn keep_local_marks_for_push() {
        let items = vec![item("1", 10, "local")];
        let out = resolve_conflict(&items, &pair(), ConflictResolution::KeepLocal, 99).unwrap();
        assert_eq!(out.items, items);
        assert_eq!(out.needs_push, vec![ClipId::from("1")]);
    }

    #[test]
    fn keep_remote_replaces() {
        let items = vec![item("1", 10, "local")];
        let out = resolve_conflict(&items, &pair(), ConflictResolution::KeepRemote, 99).unwrap();
        assert_eq!(out.items[0].content, "remote");
        assert!(out.needs_push.is_empty());
    }

    #[test]
    fn keep_both_adds_fresh_copy_at_front() {
        let items = vec![item("2", 50, "other"), item("1", 10, "local")];
        let out = resolve_conflict(&items, &pair(), ConflictResolution::KeepBoth, 99).unwrap();
        assert_eq!(out.items.len(), 3);
        assert_eq!(out.items[0].content, "remote");
        assert_eq!(out.items[0].timestamp, 99);
        assert_ne!(out.items[0].id, ClipId::from("1"));
        assert_eq!(out.items[2].content, "local");
        assert_eq!(out.needs_push.len(), 2);
    }

    #[test]
    fn missing_local_returns_none() {
        let items = vec![item("2", 10, "x")];
        assert!(resolve_conflict(&items, &pair(), ConflictResolution::KeepLocal, 0).is_none());
    }
}
