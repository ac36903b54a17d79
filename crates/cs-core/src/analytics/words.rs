//! Word and phrase frequency over text items.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::clip::{ClipItem, ClipType};

const TOP_WORDS: usize = 50;
const TOP_PHRASES: usize = 50;
const MIN_PHRASE_WORDS: usize = 2;
const MAX_PHRASE_WORDS: usize = 5;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // English
        "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
        "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
        "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
        // Chinese
        "的", "了", "在", "是", "我", "有", "和", "就", "不", "人", "都", "一", "一个", "上", "也",
        "很", "到", "说", "要", "去", "你", "会", "着", "没有", "看", "好", "自己", "这",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseCount {
    pub phrase: String,
    pub count: u64,
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// At least two characters, not a stop word, not only digits.
pub fn is_valid_word(word: &str) -> bool {
    word.chars().count() >= 2
        && !is_stop_word(word)
        && !word.chars().all(|c| c.is_ascii_digit())
}

/// Lowercased words of text items, weighted by item frequency.
///
/// Punctuation splits words; words failing [`is_valid_word`] are dropped.
/// Ties keep first-seen order.
pub(super) fn word_frequency(items: &[&ClipItem]) -> Vec<WordCount> {
    let counts = count_weighted(items, |words| {
        words.into_iter().filter(|w| is_valid_word(w)).collect()
    });

    top(counts, TOP_WORDS)
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect()
}

/// Runs of 2 to 5 consecutive words in text items, weighted by item
/// frequency. A phrase made only of stop words is skipped.
pub(super) fn extract_phrases(items: &[&ClipItem]) -> Vec<PhraseCount> {
    let counts = count_weighted(items, |words| {
        let mut phrases = Vec::new();
        for start in 0..words.len() {
            for len in MIN_PHRASE_WORDS..=MAX_PHRASE_WORDS {
                let Some(run) = words.get(start..start + len) else {
                    break;
                };
                if run.iter().any(|w| !is_stop_word(w)) {
                    phrases.push(run.join(" "));
                }
            }
        }
        phrases
    });

    top(counts, TOP_PHRASES)
        .into_iter()
        .map(|(phrase, count)| PhraseCount { phrase, count })
        .collect()
}

pub(super) fn tokenize(content: &str) -> Vec<String> {
    let cleaned: String = content
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c.is_whitespace() { c } else { ' ' })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Counts the keys `extract` yields per text item, in first-seen order.
fn count_weighted<F>(items: &[&ClipItem], extract: F) -> Vec<(String, u64)>
where
    F: Fn(Vec<String>) -> Vec<String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, u64)> = Vec::new();

    for item in items.iter().filter(|item| item.clip_type == ClipType::Text) {
        let weight = u64::from(item.frequency);
        for key in extract(tokenize(&item.content)) {
            match index.get(&key) {
                Some(&pos) => counts[pos].1 += weight,
                None => {
                    index.insert(key.clone(), counts.len());
                    counts.push((key, weight));
                }
            }
        }
    }
    counts
}

fn top(mut counts: Vec<(String, u64)>, limit: usize) -> Vec<(String, u64)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str, frequency: u32) -> ClipItem {
        let mut item = ClipItem::new(content, ClipType::Text, vec![], 0);
        item.frequency = frequency;
        item
    }

    #[test]
    fn stop_words_and_numbers_are_not_words() {
        assert!(!is_valid_word("the"));
        assert!(!is_valid_word("没有"));
        assert!(!is_valid_word("2024"));
        assert!(!is_valid_word("x"));
        assert!(is_valid_word("rust"));
        assert!(is_valid_word("v2"));
    }

    #[test]
    fn word_counts_skip_stop_words_and_digits() {
        let items = [text("The answer is 42 and the answer is rust", 2)];
        let refs: Vec<&ClipItem> = items.iter().collect();
        let words = word_frequency(&refs);

        assert_eq!(words[0], WordCount { word: "answer".into(), count: 4 });
        assert!(words.iter().all(|w| w.word != "the" && w.word != "42"));
    }

    #[test]
    fn phrases_span_two_to_five_words() {
        let items = [text("open the pod bay doors now", 1), text("open the pod", 3)];
        let refs: Vec<&ClipItem> = items.iter().collect();
        let phrases = extract_phrases(&refs);

        assert_eq!(phrases[0], PhraseCount { phrase: "open the".into(), count: 4 });
        assert!(phrases.iter().any(|p| p.phrase == "open the pod bay doors"));
        assert!(phrases.iter().all(|p| p.phrase != "open the pod bay doors now"));
        assert!(phrases.iter().all(|p| p.phrase.split(' ').count() >= 2));
    }

    #[test]
    fn phrase_of_only_stop_words_is_skipped() {
        let items = [text("to the", 1)];
        let refs: Vec<&ClipItem> = items.iter().collect();
        assert!(extract_phrases(&refs).is_empty());
    }
}
