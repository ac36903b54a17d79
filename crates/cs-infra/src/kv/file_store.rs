use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use cs_core::error::KvError;
use cs_core::ports::KeyValueStorePort;

/// One file per key under a root directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader sees either the old or the new value.
pub struct FileKeyValueStore {
    root: PathBuf,
    quota_bytes: Option<u64>,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            quota_bytes: None,
        }
    }

    pub fn with_quota(mut self, quota_bytes: Option<u64>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", file_stem(key)))
    }
}

/// Maps a key onto a portable file name.
fn file_stem(key: &str) -> String {
    let stem: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "_".to_string()
    } else {
        stem
    }
}

fn io_err(action: &str, path: &Path, err: std::io::Error) -> KvError {
    KvError::Io(format!("{action} {}: {err}", path.display()))
}

impl KeyValueStorePort for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err("read", &path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        if let Some(quota) = self.quota_bytes {
            if value.len() as u64 > quota {
                debug!(key, len = value.len(), quota, "value exceeds storage quota");
                return Err(KvError::QuotaExceeded);
            }
        }

        fs::create_dir_all(&self.root).map_err(|e| io_err("create dir", &self.root, e))?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).map_err(|e| io_err("write", &tmp_path, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| io_err("rename", &path, e))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err("remove", &path, e)),
        }
    }
}
