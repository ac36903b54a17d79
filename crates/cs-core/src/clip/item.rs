use serde::{Deserialize, Serialize};

use crate::ids::{ClipId, DeviceId};

/// Content category of a clipboard item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClipType {
    #[default]
    Text,
    Url,
    Code,
    Image,
}

impl ClipType {
    pub const ALL: [ClipType; 4] = [ClipType::Text, ClipType::Url, ClipType::Code, ClipType::Image];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClipType::Text => "text",
            ClipType::Url => "url",
            ClipType::Code => "code",
            ClipType::Image => "image",
        }
    }
}

impl std::fmt::Display for ClipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stored clipboard entry.
///
/// `content` is the dedup identity inside a store, `id` is the identity
/// across devices during sync. The serialized record uses camelCase field
/// names so stored lists stay readable by other clients of the same store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipItem {
    pub id: ClipId,
    pub content: String,
    #[serde(rename = "type", default)]
    pub clip_type: ClipType,
    /// unix epoch millis of the last touch
    pub timestamp: i64,
    pub frequency: u32,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<DeviceId>,
}

impl ClipItem {
    /// Creates a first-seen item with `frequency = 1`.
    pub fn new(content: impl Into<String>, clip_type: ClipType, tags: Vec<String>, now_ms: i64) -> Self {
        Self {
            id: ClipId::new(),
            content: content.into(),
            clip_type,
            timestamp: now_ms,
            frequency: 1,
            is_favorite: false,
            tags: dedup_tags(tags),
            device_id: None,
        }
    }

    pub fn with_id(mut self, id: ClipId) -> Self {
        self.id = id;
        self
    }

    pub fn with_device(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    /// Records a repeated capture of the same content.
    ///
    /// The timestamp never moves backwards, even if the clock does.
    pub fn touch(&mut self, now_ms: i64) {
        self.frequency = self.frequency.saturating_add(1);
        self.timestamp = now_ms.max(self.timestamp);
    }

    /// Adds tags not already present, keeping existing order.
    pub fn merge_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            let tag = tag.into();
            if !self.tags.iter().any(|t| *t == tag) {
                self.tags.push(tag);
            }
        }
    }

    /// Case-insensitive substring match over content and tags.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.content.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
