//! Document content input
//!
//! Content arrives from the generation pipeline either as lightweight
//! markup (markdown) or as already-serialized markup. The two are told
//! apart structurally, by the presence of block-level tags.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A content blob awaiting normalization
///
/// Never mutated after construction; render paths re-derive what they
/// need per export pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum Content {
    /// Lightweight markup (markdown subset: headings, lists, emphasis)
    Markdown(String),
    /// Already-serialized markup
    Markup(String),
}

fn block_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)<\s*(h[1-6]|p|ul|ol|li|div|section|article|blockquote|table)\b").unwrap()
    })
}

impl Content {
    /// Classify a raw blob as markup or markdown
    ///
    /// A blob counts as markup when it contains at least one block-level
    /// tag; inline tags alone do not qualify, since generated markdown may
    /// legitimately mention angle brackets.
    pub fn detect(raw: impl Into<String>) -> Content {
        let raw = raw.into();
        if block_tag_pattern().is_match(&raw) {
            Content::Markup(raw)
        } else {
            Content::Markdown(raw)
        }
    }

    /// The underlying text, whichever form it is in
    pub fn as_str(&self) -> &str {
        match self {
            Content::Markdown(s) | Content::Markup(s) => s,
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, Content::Markup(_))
    }

    /// True when the blob contains no visible text at all
    pub fn is_empty(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_is_detected() {
        let content = Content::detect("# Title\n\nBody text with **bold**.");
        assert!(!content.is_markup());
    }

    #[test]
    fn block_tags_are_detected_as_markup() {
        assert!(Content::detect("<h1>Title</h1><p>Body</p>").is_markup());
        assert!(Content::detect("<div class=\"x\"><p>hi</p></div>").is_markup());
    }

    #[test]
    fn inline_tags_alone_are_not_markup() {
        assert!(!Content::detect("use <strong> sparingly").is_markup());
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert!(Content::detect("<P>upper case tag</P>").is_markup());
    }

    #[test]
    fn empty_content_is_flagged() {
        assert!(Content::detect("   \n  ").is_empty());
        assert!(!Content::detect("text").is_empty());
    }
}
