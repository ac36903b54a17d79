//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `cs-app` and the
//! adapters in `cs-infra`. The core never constructs an adapter itself;
//! everything is handed in by the bootstrap wiring.

mod backup_target;
mod clock;
mod kv_store;
mod remote_channel;
mod settings;

pub use backup_target::BackupTargetPort;
pub use clock::ClockPort;
pub use kv_store::KeyValueStorePort;
pub use remote_channel::RemoteChannelPort;
pub use settings::{SettingsMigrationPort, SettingsMigratorPort, SettingsPort};
