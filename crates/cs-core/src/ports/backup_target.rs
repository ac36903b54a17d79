use anyhow::Result;
use async_trait::async_trait;

use crate::backup::BackupDocument;

/// Destination for backup documents written without a user-chosen path.
#[async_trait]
pub trait BackupTargetPort: Send + Sync {
    /// Persists `document` and returns where it went.
    async fn write(&self, document: &BackupDocument) -> Result<String>;
}
