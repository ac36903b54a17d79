//! Read-only views over an ordered item list.
//!
//! All functions preserve the relative order of the input unless they are
//! explicitly sorting.

use serde::{Deserialize, Serialize};

use super::{ClipItem, ClipType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// newest first
    Time,
    /// most captured first
    Frequency,
    /// longest content first
    Length,
}

/// Case-insensitive substring search over content and tags.
///
/// An empty query matches everything.
pub fn search<'a>(items: &'a [ClipItem], query: &str) -> Vec<&'a ClipItem> {
    if query.is_empty() {
        return items.iter().collect();
    }
    let needle = query.to_lowercase();
    items.iter().filter(|item| item.matches_lowercase(&needle)).collect()
}

pub fn filter_by_type(items: &[ClipItem], clip_type: ClipType) -> Vec<&ClipItem> {
    items.iter().filter(|item| item.clip_type == clip_type).collect()
}

pub fn favorites(items: &[ClipItem]) -> Vec<&ClipItem> {
    items.iter().filter(|item| item.is_favorite).collect()
}

/// Returns a sorted copy. Sorting is stable so ties keep store order.
pub fn sorted(items: &[ClipItem], order: SortOrder) -> Vec<ClipItem> {
    let mut out = items.to_vec();
    match order {
        SortOrder::Time => out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortOrder::Frequency => out.sort_by(|a, b| b.frequency.cmp(&a.frequency)),
        SortOrder::Length => out.sort_by_key(|item| std::cmp::Reverse(item.char_len())),
    }
    out
}
