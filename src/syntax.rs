//! Bracketed chapter and sub-verse letter handling

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// "4[2] Kings" -> "2 Kings": the bracketed number is the mainstream one
static ALT_CHAPTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+\[([0-9]+)\]").unwrap());

/// Letters glued to a verse number: "2:8ABCD"
static SUB_VERSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)([a-zA-Z]+)").unwrap());

/// The two renderings of one reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedReference {
    /// Anchor text: sub-verse letters kept, lower-cased
    pub display: String,
    /// Search text: alternate chapters collapsed, sub-verse letters dropped
    pub url: String,
}

/// Derive display and URL forms from the same input
pub fn normalize_syntax(reference: &str) -> NormalizedReference {
    NormalizedReference {
        display: display_form(reference),
        url: url_form(reference),
    }
}

pub fn url_form(reference: &str) -> String {
    let collapsed = ALT_CHAPTER_RE.replace_all(reference, "$1");
    SUB_VERSE_RE.replace_all(&collapsed, "$1").into_owned()
}

pub fn display_form(reference: &str) -> String {
    SUB_VERSE_RE
        .replace_all(reference, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].to_lowercase())
        })
        .into_owned()
}
