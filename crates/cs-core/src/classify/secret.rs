use once_cell::sync::Lazy;
use regex::Regex;

static PASSWORD_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)password|passwd|pwd").expect("valid password hint regex"));

static DENSE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9!@#$%^&*]{8,}$").expect("valid token regex"));

static NUMERIC_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6,}$").expect("valid digits regex"));

/// Heuristic used to keep probable credentials out of automatic capture.
///
/// Both false positives (long single words) and false negatives are
/// expected; this is a capture filter, not a detector.
pub fn is_likely_secret(content: &str) -> bool {
    PASSWORD_HINT.is_match(content) || DENSE_TOKEN.is_match(content) || NUMERIC_CODE.is_match(content)
}
