use anyhow::Result;
use async_trait::async_trait;

use crate::clip::ClipItem;

/// Remote side of sync. Transport (HTTP, sockets, auth) lives behind it.
#[async_trait]
pub trait RemoteChannelPort: Send + Sync {
    /// Current remote snapshot.
    async fn fetch_items(&self) -> Result<Vec<ClipItem>>;

    /// Sends local items upstream. An empty slice is allowed.
    async fn push_items(&self, items: &[ClipItem]) -> Result<()>;
}
