//! # cs-core
//!
//! Core domain models and business logic for clipsync.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: the clipboard item model, content classification, list
//! reconciliation for sync, statistics, and the port traits adapters
//! implement.

pub mod analytics;
pub mod backup;
pub mod classify;
pub mod clip;
pub mod config;
pub mod error;
pub mod ids;
pub mod ports;
pub mod settings;
pub mod sync;

// Re-export commonly used types at the crate root
pub use clip::{ClipItem, ClipType, SortOrder};
pub use config::AppConfig;
pub use error::{KvError, SettingsError, StoreError};
pub use ids::{ClipId, DeviceId};
pub use settings::Settings;
pub use sync::{reconcile, ConflictPair, ConflictResolution, MergeOutcome, SyncStatus};
