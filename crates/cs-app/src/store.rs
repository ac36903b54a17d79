//! Persistent, deduplicated clipboard history.
//!
//! [`ItemStore`] keeps the ordered item list in memory and writes the full
//! list to the key-value port on every mutation, before returning. A new
//! list only replaces the in-memory one after it was written, so a failed
//! write leaves the store exactly as it was.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use tracing::{debug, warn};

use cs_core::clip::{collapse_duplicate_content, query, ClipItem, ClipType, SortOrder};
use cs_core::error::StoreError;
use cs_core::ids::{ClipId, DeviceId};
use cs_core::ports::{ClockPort, KeyValueStorePort};
use cs_core::settings::DEFAULT_HISTORY_LIMIT;

pub const DEFAULT_ITEMS_KEY: &str = "clipsync_items";

/// Items dropped from the tail when the backing store reports a full quota.
pub const QUOTA_EVICTION_BATCH: usize = 100;

pub type SharedItemStore = Arc<Mutex<ItemStore>>;

/// Locks a shared store, turning lock poisoning into an error.
pub fn lock_store(store: &SharedItemStore) -> anyhow::Result<MutexGuard<'_, ItemStore>> {
    store.lock().map_err(|_| anyhow!("item store lock poisoned"))
}

pub fn encode_items(items: &[ClipItem]) -> Result<String, StoreError> {
    serde_json::to_string(items).map_err(|e| StoreError::Serialization(e.to_string()))
}

pub fn decode_items(raw: &str) -> Result<Vec<ClipItem>, StoreError> {
    serde_json::from_str(raw).map_err(|e| StoreError::MalformedInput(e.to_string()))
}

pub struct ItemStore {
    kv: Arc<dyn KeyValueStorePort>,
    clock: Arc<dyn ClockPort>,
    key: String,
    capacity: usize,
    device_id: Option<DeviceId>,
    items: Vec<ClipItem>,
}

impl ItemStore {
    /// Loads the persisted list under `key`, or starts empty.
    ///
    /// A stored value that is not a list of items is reported as
    /// [`StoreError::MalformedInput`] instead of being overwritten. A zero
    /// `capacity` is [`StoreError::ZeroCapacity`].
    pub fn open(
        kv: Arc<dyn KeyValueStorePort>,
        clock: Arc<dyn ClockPort>,
        key: impl Into<String>,
        capacity: usize,
    ) -> Result<Self, StoreError> {
        let key = key.into();
        ensure_capacity(capacity)?;

        let mut items = match kv.get(&key)? {
            Some(raw) => decode_items(&raw)?,
            None => Vec::new(),
        };

        let loaded = items.len();
        items = collapse_duplicate_content(items);
        items.truncate(capacity);
        debug!(key = %key, loaded, kept = items.len(), "item store opened");

        Ok(Self {
            kv,
            clock,
            key,
            capacity,
            device_id: None,
            items,
        })
    }

    /// Opens with the default key and capacity.
    pub fn open_default(
        kv: Arc<dyn KeyValueStorePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Result<Self, StoreError> {
        Self::open(kv, clock, DEFAULT_ITEMS_KEY, DEFAULT_HISTORY_LIMIT)
    }

    /// Stamps newly created items with this device id.
    pub fn with_device(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    pub fn into_shared(self) -> SharedItemStore {
        Arc::new(Mutex::new(self))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in store order, most recently touched first.
    pub fn all(&self) -> &[ClipItem] {
        &self.items
    }

    pub fn get(&self, id: &ClipId) -> Option<&ClipItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    pub fn search(&self, query: &str) -> Vec<ClipItem> {
        query::search(&self.items, query).into_iter().cloned().collect()
    }

    pub fn favorites(&self) -> Vec<ClipItem> {
        query::favorites(&self.items).into_iter().cloned().collect()
    }

    pub fn filter_by_type(&self, clip_type: ClipType) -> Vec<ClipItem> {
        query::filter_by_type(&self.items, clip_type)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Sorted copy; the store order itself is untouched.
    pub fn sorted(&self, order: SortOrder) -> Vec<ClipItem> {
        query::sorted(&self.items, order)
    }

    /// Records a capture of `content`.
    ///
    /// Known content is promoted to the front with its frequency bumped and
    /// its id, type and favorite flag kept. Unknown content becomes a new
    /// item at the front. The tail beyond capacity is evicted.
    pub fn upsert(
        &mut self,
        content: &str,
        clip_type: ClipType,
        tags: Vec<String>,
    ) -> Result<ClipItem, StoreError> {
        let now = self.clock.now_ms();
        let mut next = self.items.clone();

        let item = match next.iter().position(|item| item.content == content) {
            Some(pos) => {
                let mut existing = next.remove(pos);
                existing.touch(now);
                existing.merge_tags(tags);
                existing
            }
            None => {
                let mut created = ClipItem::new(content, clip_type, tags, now);
                created.device_id = self.device_id.clone();
                created
            }
        };

        next.insert(0, item.clone());
        next.truncate(self.capacity);
        self.commit(next)?;

        debug!(id = %item.id, frequency = item.frequency, "item upserted");
        Ok(item)
    }

    /// Removes the item with `id`. Unknown ids are a no-op returning `false`.
    pub fn delete(&mut self, id: &ClipId) -> Result<bool, StoreError> {
        let Some(pos) = self.items.iter().position(|item| item.id == *id) else {
            return Ok(false);
        };

        let mut next = self.items.clone();
        next.remove(pos);
        self.commit(next)?;
        Ok(true)
    }

    /// Flips the favorite flag, `None` for an unknown id.
    pub fn toggle_favorite(&mut self, id: &ClipId) -> Result<Option<ClipItem>, StoreError> {
        self.modify(id, |item| item.is_favorite = !item.is_favorite)
    }

    /// Replaces the tag list of an item, `None` for an unknown id.
    pub fn update_tags(
        &mut self,
        id: &ClipId,
        tags: Vec<String>,
    ) -> Result<Option<ClipItem>, StoreError> {
        self.modify(id, |item| {
            item.tags.clear();
            item.merge_tags(tags);
        })
    }

    /// Drops every item and the persisted value.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.kv.remove(&self.key)?;
        self.items.clear();
        Ok(())
    }

    /// Swaps in a complete list, e.g. a sync merge or a backup import.
    ///
    /// Items sharing content collapse into the first occurrence, then the
    /// capacity bound applies.
    pub fn replace_all(&mut self, items: Vec<ClipItem>) -> Result<(), StoreError> {
        self.replace_all_with_capacity(items, self.capacity)
    }

    /// [`replace_all`](Self::replace_all) under a new capacity bound.
    ///
    /// The list is truncated to `capacity`, not the current bound, and the
    /// bound only changes once the list was written.
    pub fn replace_all_with_capacity(
        &mut self,
        items: Vec<ClipItem>,
        capacity: usize,
    ) -> Result<(), StoreError> {
        ensure_capacity(capacity)?;
        let mut next = collapse_duplicate_content(items);
        next.truncate(capacity);
        self.commit(next)?;
        self.capacity = capacity;
        Ok(())
    }

    /// Changes the capacity bound, evicting from the tail if it shrank.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), StoreError> {
        ensure_capacity(capacity)?;
        if capacity < self.items.len() {
            let mut next = self.items.clone();
            next.truncate(capacity);
            self.commit(next)?;
        }
        self.capacity = capacity;
        Ok(())
    }

    fn modify<F>(&mut self, id: &ClipId, f: F) -> Result<Option<ClipItem>, StoreError>
    where
        F: FnOnce(&mut ClipItem),
    {
        let Some(pos) = self.items.iter().position(|item| item.id == *id) else {
            return Ok(None);
        };

        let mut next = self.items.clone();
        f(&mut next[pos]);
        let updated = next[pos].clone();
        self.commit(next)?;
        Ok(Some(updated))
    }

    /// Writes `next` and adopts it as the current list.
    ///
    /// A full quota triggers one retry after dropping the oldest
    /// [`QUOTA_EVICTION_BATCH`] items; the front item always survives.
    fn commit(&mut self, mut next: Vec<ClipItem>) -> Result<(), StoreError> {
        match self.write(&next) {
            Ok(()) => {}
            Err(StoreError::QuotaExceeded) => {
                let keep = next.len().saturating_sub(QUOTA_EVICTION_BATCH).max(1);
                let evicted = next.len().saturating_sub(keep);
                warn!(evicted, kept = keep, "storage quota exceeded, evicting oldest items");
                next.truncate(keep);
                self.write(&next)?;
            }
            Err(err) => return Err(err),
        }

        self.items = next;
        Ok(())
    }

    fn write(&self, items: &[ClipItem]) -> Result<(), StoreError> {
        let raw = encode_items(items)?;
        self.kv.set(&self.key, &raw)?;
        Ok(())
    }
}

fn ensure_capacity(capacity: usize) -> Result<(), StoreError> {
    if capacity == 0 {
        return Err(StoreError::ZeroCapacity);
    }
    Ok(())
}
