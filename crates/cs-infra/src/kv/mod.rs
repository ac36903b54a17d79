//! Key-value store adapters behind [`KeyValueStorePort`](cs_core::ports::KeyValueStorePort).

mod file_store;
mod in_memory;

pub use file_store::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;
