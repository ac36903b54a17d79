use once_cell::sync::Lazy;
use regex::Regex;

use crate::clip::ClipType;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://.+").expect("valid url regex"));

/// Leading keyword, brace-delimited block, HTML-like tag.
static CODE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^(function|class|const|let|var|import|export)").expect("valid keyword regex"),
        Regex::new(r"\{\s*[\w\s:;,()=>\[\]{}]+\s*\}").expect("valid block regex"),
        Regex::new(r"(?i)<[a-z][\s\S]*>").expect("valid tag regex"),
    ]
});

/// Classifies content as url, code or text. First match wins in that order.
///
/// Never returns [`ClipType::Image`]; images are only produced by capture
/// adapters that declare the type explicitly.
pub fn detect_type(content: &str) -> ClipType {
    if URL_PATTERN.is_match(content.trim()) {
        return ClipType::Url;
    }

    if CODE_PATTERNS.iter().any(|p| p.is_match(content)) {
        return ClipType::Code;
    }

    ClipType::Text
}
