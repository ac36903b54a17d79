use std::collections::HashSet;

use crate::clip::ClipItem;
use crate::error::StoreError;

/// Items touched after the last successful sync.
pub fn changed_since(items: &[ClipItem], last_sync_ms: i64) -> Vec<ClipItem> {
    items
        .iter()
        .filter(|item| item.timestamp > last_sync_ms)
        .cloned()
        .collect()
}

/// Structural checks on a list received from outside the store.
///
/// Runs before any merge so a bad payload never touches local state.
pub fn validate_items(items: &[ClipItem]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(items.len());
    for (pos, item) in items.iter().enumerate() {
        if item.id.is_blank() {
            return Err(StoreError::MalformedInput(format!("item #{pos} has an empty id")));
        }
        if item.frequency == 0 {
            return Err(StoreError::MalformedInput(format!(
                "item {} has frequency 0",
                item.id
            )));
        }
        if !seen.insert(&item.id) {
            return Err(StoreError::MalformedInput(format!("duplicate id {}", item.id)));
        }
    }
    Ok(())
}
