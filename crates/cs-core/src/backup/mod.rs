//! Export/import document for the whole history.

mod history;

pub use history::{should_auto_backup, BackupHistory, BackupRecord, BACKUP_HISTORY_LIMIT};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clip::ClipItem;
use crate::error::StoreError;
use crate::settings::Settings;
use crate::sync::validate_items;

pub const BACKUP_FORMAT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub items: Vec<ClipItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

impl BackupDocument {
    pub fn new(items: Vec<ClipItem>, settings: Option<Settings>, export_date: DateTime<Utc>) -> Self {
        Self {
            version: BACKUP_FORMAT_VERSION.to_string(),
            export_date,
            items,
            settings,
        }
    }

    /// Rejects documents whose item list would break store invariants.
    pub fn validate(&self) -> Result<(), StoreError> {
        validate_items(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipType;
    use crate::ids::ClipId;

    fn epoch() -> DateTime<Utc> {
        DateTime::from_timestamp(0, 0).unwrap()
    }

    #[test]
    fn camel_case_document() {
        let doc = BackupDocument::new(vec![], None, epoch());
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["version"], BACKUP_FORMAT_VERSION);
        assert!(json.get("exportDate").is_some());
        assert!(json.get("settings").is_none());
    }

    #[test]
    fn validate_catches_duplicate_ids() {
        let a = ClipItem::new("a", ClipType::Text, vec![], 1).with_id(ClipId::from("x"));
        let b = ClipItem::new("b", ClipType::Text, vec![], 2).with_id(ClipId::from("x"));
        let doc = BackupDocument::new(vec![a, b], None, epoch());
        assert!(doc.validate().is_err());
    }
}
