//! Plain-text excerpts derived from post bodies.

use once_cell::sync::Lazy;
use regex::Regex;

pub const EXCERPT_MAX_CHARS: usize = 160;
const ELLIPSIS: &str = "...";

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// Remove markup tags and collapse runs of whitespace into single spaces.
pub fn strip_tags(content: &str) -> String {
    let without_tags = TAG_PATTERN.replace_all(content, " ");
    without_tags.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build an excerpt of at most [`EXCERPT_MAX_CHARS`] characters from `content`,
/// followed by an ellipsis when the text had to be cut.
pub fn derive_excerpt(content: &str) -> String {
    let text = strip_tags(content);
    if text.chars().count() <= EXCERPT_MAX_CHARS {
        return text;
    }

    let mut excerpt: String = text.chars().take(EXCERPT_MAX_CHARS).collect();
    excerpt.truncate(excerpt.trim_end().len());
    excerpt.push_str(ELLIPSIS);
    excerpt
}
