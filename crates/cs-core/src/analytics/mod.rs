//! Usage statistics over the item history.

mod patterns;
mod recommend;
mod words;

use chrono::{DateTime, Datelike, Timelike};
use serde::{Deserialize, Serialize};

use crate::clip::{ClipItem, ClipType};

pub use patterns::{detect_patterns, PatternCounts};
pub use recommend::{recommend, recommendation_score, Recommendation, DEFAULT_RECOMMENDATIONS};
pub use words::{is_stop_word, is_valid_word, PhraseCount, WordCount};

use words::{extract_phrases, word_frequency};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsRange {
    All,
    Today,
    Week,
    Month,
}

impl StatsRange {
    fn window_ms(self) -> Option<i64> {
        match self {
            StatsRange::All => None,
            StatsRange::Today => Some(DAY_MS),
            StatsRange::Week => Some(7 * DAY_MS),
            StatsRange::Month => Some(30 * DAY_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    pub min: usize,
    pub max: usize,
    pub avg: f64,
    pub median: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// sum of frequencies
    pub total_copies: u64,
    pub unique_items: usize,
    pub top_words: Vec<WordCount>,
    pub top_word: Option<String>,
    /// most frequent 2 to 5 word runs
    pub phrases: Vec<PhraseCount>,
    pub patterns: PatternCounts,
    pub type_distribution: Vec<(ClipType, usize)>,
    /// copies per UTC hour of day
    pub hourly: [u64; 24],
    /// copies per weekday, Sunday first
    pub daily: [u64; 7],
    pub length: Option<LengthStats>,
}

/// Items whose last touch falls inside the range ending at `now_ms`.
pub fn items_in_range(items: &[ClipItem], range: StatsRange, now_ms: i64) -> Vec<&ClipItem> {
    match range.window_ms() {
        None => items.iter().collect(),
        Some(window) => {
            let limit = now_ms - window;
            items.iter().filter(|item| item.timestamp >= limit).collect()
        }
    }
}

pub fn statistics(items: &[ClipItem], range: StatsRange, now_ms: i64) -> Statistics {
    let selected = items_in_range(items, range, now_ms);

    let total_copies = selected.iter().map(|item| u64::from(item.frequency)).sum();
    let top_words = word_frequency(&selected);
    let top_word = top_words.first().map(|w| w.word.clone());

    let mut hourly = [0u64; 24];
    let mut daily = [0u64; 7];
    for item in &selected {
        if let Some(at) = DateTime::from_timestamp_millis(item.timestamp) {
            hourly[at.hour() as usize] += u64::from(item.frequency);
            daily[at.weekday().num_days_from_sunday() as usize] += u64::from(item.frequency);
        }
    }

    Statistics {
        total_copies,
        unique_items: selected.len(),
        top_words,
        top_word,
        phrases: extract_phrases(&selected),
        patterns: detect_patterns(selected.iter().copied()),
        type_distribution: type_distribution(&selected),
        hourly,
        daily,
        length: length_stats(&selected),
    }
}

fn type_distribution(items: &[&ClipItem]) -> Vec<(ClipType, usize)> {
    ClipType::ALL
        .iter()
        .map(|t| (*t, items.iter().filter(|item| item.clip_type == *t).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

fn length_stats(items: &[&ClipItem]) -> Option<LengthStats> {
    if items.is_empty() {
        return None;
    }

    let mut lengths: Vec<usize> = items.iter().map(|item| item.char_len()).collect();
    lengths.sort_unstable();

    let n = lengths.len();
    let sum: usize = lengths.iter().sum();
    let mid = n / 2;
    let median = if n % 2 == 0 {
        (lengths[mid - 1] + lengths[mid]) as f64 / 2.0
    } else {
        lengths[mid] as f64
    };

    Some(LengthStats {
        min: lengths[0],
        max: lengths[n - 1],
        avg: sum as f64 / n as f64,
        median,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(content: &str, clip_type: ClipType, ts: i64, frequency: u32) -> ClipItem {
        let mut item = ClipItem::new(content, clip_type, vec![], ts);
        item.frequency = frequency;
        item
    }

    #[test]
    fn counts_copies_and_words() {
        let items = vec![
            item("Hello, world!", ClipType::Text, 0, 2),
            item("hello again", ClipType::Text, 0, 1),
            item("https://hello.example", ClipType::Url, 0, 5),
        ];

        let stats = statistics(&items, StatsRange::All, 0);

        assert_eq!(stats.total_copies, 8);
        assert_eq!(stats.unique_items, 3);
        assert_eq!(stats.top_word.as_deref(), Some("hello"));
        assert_eq!(stats.top_words[0].count, 3);
        assert_eq!(stats.top_words[1].word, "world");
        assert!(stats.top_words.iter().all(|w| w.word != "https"));
        assert_eq!(stats.patterns.urls, 5);
        assert_eq!(stats.phrases[0].phrase, "hello world");
    }

    #[test]
    fn range_filters_by_timestamp() {
        let now = 100 * DAY_MS;
        let items = vec![
            item("recent", ClipType::Text, now - 1000, 1),
            item("old", ClipType::Text, now - 2 * DAY_MS, 1),
        ];

        assert_eq!(statistics(&items, StatsRange::Today, now).unique_items, 1);
        assert_eq!(statistics(&items, StatsRange::Week, now).unique_items, 2);
    }

    #[test]
    fn length_median_for_even_count() {
        let items = vec![
            item("a", ClipType::Text, 0, 1),
            item("abc", ClipType::Text, 0, 1),
        ];
        let length = statistics(&items, StatsRange::All, 0).length.unwrap();
        assert_eq!(length.min, 1);
        assert_eq!(length.max, 3);
        assert_eq!(length.median, 2.0);
    }

    #[test]
    fn hourly_buckets_use_utc() {
        // 1970-01-01T03:00:00Z, a Thursday
        let items = vec![item("x", ClipType::Text, 3 * 60 * 60 * 1000, 4)];
        let stats = statistics(&items, StatsRange::All, 0);
        assert_eq!(stats.hourly[3], 4);
        assert_eq!(stats.daily[4], 4);
    }

    #[test]
    fn empty_history() {
        let stats = statistics(&[], StatsRange::All, 0);
        assert_eq!(stats.total_copies, 0);
        assert!(stats.top_word.is_none());
        assert!(stats.length.is_none());
        assert!(stats.type_distribution.is_empty());
        assert!(stats.phrases.is_empty());
        assert_eq!(stats.patterns, PatternCounts::default());
    }
}
