//! Stateless content classification.
//!
//! Capture runs [`classify`] once per event: the type decides how the item
//! is displayed, the secret flag decides whether it is stored at all.

mod content_type;
mod secret;

pub use content_type::detect_type;
pub use secret::is_likely_secret;

use crate::clip::ClipType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub clip_type: ClipType,
    pub likely_secret: bool,
}

pub fn classify(content: &str) -> Classification {
    Classification {
        clip_type: detect_type(content),
        likely_secret: is_likely_secret(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_combines_both_checks() {
        let c = classify("https://example.com/?pwd=1");
        assert_eq!(c.clip_type, ClipType::Url);
        assert!(c.likely_secret);
    }
}
