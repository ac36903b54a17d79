//! Counts of recognizable content shapes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::clip::{ClipItem, ClipType};

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3,4}[-.\s]?\d{4}")
        .expect("valid phone regex")
});

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{4}[-/]\d{2}[-/]\d{2}\b|\b\d{2}[-/]\d{2}[-/]\d{4}\b").expect("valid date regex")
});

/// Copies (item frequency) of items containing each shape. One item can
/// count towards several shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCounts {
    pub urls: u64,
    pub emails: u64,
    pub phone_numbers: u64,
    pub dates: u64,
    pub code: u64,
}

pub fn detect_patterns<'a>(items: impl IntoIterator<Item = &'a ClipItem>) -> PatternCounts {
    let mut counts = PatternCounts::default();

    for item in items {
        let weight = u64::from(item.frequency);
        let content = item.content.as_str();

        if URL.is_match(content) {
            counts.urls += weight;
        }
        if EMAIL.is_match(content) {
            counts.emails += weight;
        }
        if PHONE.is_match(content) {
            counts.phone_numbers += weight;
        }
        if DATE.is_match(content) {
            counts.dates += weight;
        }
        if item.clip_type == ClipType::Code {
            counts.code += weight;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(content: &str, clip_type: ClipType, frequency: u32) -> ClipItem {
        let mut item = ClipItem::new(content, clip_type, vec![], 0);
        item.frequency = frequency;
        item
    }

    #[test]
    fn shapes_are_weighted_by_frequency() {
        let items = vec![
            item("see https://example.com/docs", ClipType::Url, 3),
            item("mail ada@example.org on 2024-01-15", ClipType::Text, 2),
            item("call (555) 123-4567", ClipType::Text, 1),
            item("fn main() {}", ClipType::Code, 4),
        ];

        let counts = detect_patterns(&items);
        assert_eq!(
            counts,
            PatternCounts {
                urls: 3,
                emails: 2,
                phone_numbers: 1,
                dates: 2,
                code: 4,
            }
        );
    }

    #[test]
    fn plain_prose_matches_nothing() {
        let items = vec![item("just a note", ClipType::Text, 5)];
        assert_eq!(detect_patterns(&items), PatternCounts::default());
    }
}
