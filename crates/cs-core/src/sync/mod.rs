//! Sync domain: list reconciliation and conflict handling.

mod delta;
mod reconcile;
mod resolution;
mod status;

pub use delta::{changed_since, validate_items};
pub use reconcile::{reconcile, ConflictPair, MergeOutcome};
pub use resolution::{resolve_conflict, ConflictResolution, ResolutionOutcome};
pub use status::SyncStatus;
