//! Sync use cases: reconcile the local history with the remote channel.

mod merge;
mod pull;
mod push;
mod resolve;
mod run_cycle;
mod scheduler;
mod status;

pub use pull::PullRemoteItems;
pub use push::PushLocalItems;
pub use resolve::ResolveConflict;
pub use run_cycle::{RunSyncCycle, SyncMode, SyncReport};
pub use scheduler::SyncScheduler;
pub use status::{lock_status, SyncStatusHandle};
