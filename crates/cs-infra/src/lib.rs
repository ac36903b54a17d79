pub mod backup;
pub mod fs;
pub mod kv;
pub mod remote;
pub mod settings;
pub mod time;

pub use backup::DirectoryBackupTarget;
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore};
pub use remote::InMemoryRemoteChannel;
pub use settings::{FileSettingsRepository, SettingsMigrator};
pub use time::SystemClock;
