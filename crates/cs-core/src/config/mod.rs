//! # Startup configuration (pure data)
//!
//! Maps the TOML config file onto [`AppConfig`]. No validation and no
//! defaulting happens here: an empty string or a zero is a fact that the
//! bootstrap wiring interprets.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// May be empty.
    pub device_name: String,

    /// Directory for the item store, settings file and logs.
    pub data_dir: PathBuf,

    /// Key under which the item list is persisted. May be empty.
    pub items_key: String,

    /// Maximum size in bytes of one persisted value, `None` when unset.
    pub quota_bytes: Option<u64>,

    /// Sync scheduler period override, 0 when unset.
    pub sync_interval_secs: u64,
}

impl AppConfig {
    /// Builds the config from a parsed TOML document.
    ///
    /// Missing sections produce empty values rather than errors.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let quota = toml_value
            .get("storage")
            .and_then(|s| s.get("quota_bytes"))
            .and_then(|v| v.as_integer());
        if let Some(q) = quota {
            if q < 0 {
                anyhow::bail!("storage.quota_bytes must not be negative: {q}");
            }
        }

        Ok(Self {
            device_name: toml_value
                .get("general")
                .and_then(|g| g.get("device_name"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            data_dir: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("data_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            items_key: toml_value
                .get("storage")
                .and_then(|s| s.get("items_key"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            quota_bytes: quota.map(|q| q as u64),
            sync_interval_secs: toml_value
                .get("sync")
                .and_then(|s| s.get("interval_secs"))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(0),
        })
    }

    pub fn empty() -> Self {
        Self {
            device_name: String::new(),
            data_dir: PathBuf::new(),
            items_key: String::new(),
            quota_bytes: None,
            sync_interval_secs: 0,
        }
    }

    /// Config rooted at a platform data directory computed by the caller.
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn reads_all_sections() {
        let toml_str = r#"
            [general]
            device_name = "laptop"

            [storage]
            data_dir = "/tmp/clipsync"
            items_key = "items"
            quota_bytes = 4096

            [sync]
            interval_secs = 10
        "#;
        let value: Value = toml::from_str(toml_str).unwrap();
        let config = AppConfig::from_toml(&value).unwrap();

        assert_eq!(config.device_name, "laptop");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/clipsync"));
        assert_eq!(config.items_key, "items");
        assert_eq!(config.quota_bytes, Some(4096));
        assert_eq!(config.sync_interval_secs, 10);
    }

    #[test]
    fn missing_sections_are_empty_facts() {
        let value: Value = toml::from_str("").unwrap();
        assert_eq!(AppConfig::from_toml(&value).unwrap(), AppConfig::empty());
    }

    #[test]
    fn negative_quota_is_rejected() {
        let value: Value = toml::from_str("[storage]\nquota_bytes = -1").unwrap();
        assert!(AppConfig::from_toml(&value).is_err());
    }
}
