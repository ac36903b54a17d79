use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::debug;

use cs_core::clip::ClipItem;
use cs_core::ids::ClipId;
use cs_core::ports::RemoteChannelPort;

/// Stand-in for a cloud endpoint: keeps one copy per id, newest wins.
///
/// Several local stores can share one instance to exercise device-to-device
/// sync without any transport.
#[derive(Default)]
pub struct InMemoryRemoteChannel {
    items: Mutex<HashMap<ClipId, ClipItem>>,
}

impl InMemoryRemoteChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the remote side, bypassing the newest-wins rule.
    pub fn with_items(items: Vec<ClipItem>) -> Self {
        Self {
            items: Mutex::new(items.into_iter().map(|i| (i.id.clone(), i)).collect()),
        }
    }

    /// Remote contents, newest first.
    pub fn snapshot(&self) -> Result<Vec<ClipItem>> {
        let items = self
            .items
            .lock()
            .map_err(|_| anyhow!("remote channel lock poisoned"))?;
        let mut out: Vec<ClipItem> = items.values().cloned().collect();
        out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(out)
    }
}

#[async_trait]
impl RemoteChannelPort for InMemoryRemoteChannel {
    async fn fetch_items(&self) -> Result<Vec<ClipItem>> {
        self.snapshot()
    }

    async fn push_items(&self, items: &[ClipItem]) -> Result<()> {
        let mut stored = self
            .items
            .lock()
            .map_err(|_| anyhow!("remote channel lock poisoned"))?;
        let mut accepted = 0usize;
        for item in items {
            let newer = stored
                .get(&item.id)
                .map_or(true, |existing| item.timestamp >= existing.timestamp);
            if newer {
                stored.insert(item.id.clone(), item.clone());
                accepted += 1;
            }
        }
        debug!(pushed = items.len(), accepted, "remote channel received items");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_core::clip::ClipType;

    fn item(id: &str, content: &str, ts: i64) -> ClipItem {
        ClipItem::new(content, ClipType::Text, vec![], ts).with_id(ClipId::from(id))
    }

    #[tokio::test]
    async fn older_push_does_not_overwrite() {
        let remote = InMemoryRemoteChannel::with_items(vec![item("1", "new", 20)]);
        remote.push_items(&[item("1", "old", 10)]).await.unwrap();
        assert_eq!(remote.fetch_items().await.unwrap()[0].content, "new");

        remote.push_items(&[item("1", "newer", 30)]).await.unwrap();
        assert_eq!(remote.fetch_items().await.unwrap()[0].content, "newer");
    }

    #[tokio::test]
    async fn fetch_is_newest_first() {
        let remote = InMemoryRemoteChannel::new();
        remote
            .push_items(&[item("a", "a", 1), item("b", "b", 3), item("c", "c", 2)])
            .await
            .unwrap();
        let ids: Vec<String> = remote
            .fetch_items()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id.to_string())
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }
}
