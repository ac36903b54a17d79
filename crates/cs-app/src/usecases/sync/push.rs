use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use cs_core::ports::RemoteChannelPort;

use crate::store::{lock_store, SharedItemStore};

/// Sends the whole local history upstream, regardless of last sync time.
pub struct PushLocalItems {
    store: SharedItemStore,
    remote: Arc<dyn RemoteChannelPort>,
}

impl PushLocalItems {
    pub fn new(store: SharedItemStore, remote: Arc<dyn RemoteChannelPort>) -> Self {
        Self { store, remote }
    }

    /// Returns the number of items pushed.
    #[tracing::instrument(name = "usecase.push_local_items.execute", skip(self))]
    pub async fn execute(&self) -> Result<usize> {
        let items = lock_store(&self.store)?.all().to_vec();
        self.remote
            .push_items(&items)
            .await
            .context("push local items")?;

        info!(count = items.len(), "Pushed local items");
        Ok(items.len())
    }
}
