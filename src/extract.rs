//! Reference extraction from generated text
//!
//! Scrapers mark citations with `<a>REFERENCE</a>`; rendered messages carry
//! them as markdown links to the search service.

use crate::link::convert;
use crate::tables::ReferenceTables;
use crate::text::ends_with_digit;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `<a>INNER</a>`, tolerant of whitespace inside the tags
static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<\s*a\s*>([^<>]*)<\s*/\s*a\s*>").unwrap());

/// Markdown link: [anchor](target). The anchor may hold bracketed
/// alternate chapters such as "4[2] Kings".
static MD_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[((?:[^\[\]]|\[[^\[\]]*\])+)\]\((https?://[^\s\)]+)\)").unwrap()
});

/// Replace every inline marker with its converted link
pub fn convert_inline(text: &str, tables: &ReferenceTables) -> String {
    MARKER_RE
        .replace_all(text, |caps: &Captures| convert(caps[1].trim(), tables))
        .into_owned()
}

/// Raw inner text of every marker that looks like a citation, in order.
///
/// Markers whose text does not end in a digit are prose and are dropped.
pub fn extract_references(text: &str) -> Vec<String> {
    MARKER_RE
        .captures_iter(text)
        .map(|cap| cap[1].trim().to_string())
        .filter(|reference| ends_with_digit(reference))
        .collect()
}

/// Anchor texts of markdown links that point at the search service
pub fn extract_linked_references(text: &str, search_url: &str) -> Vec<String> {
    MD_LINK_RE
        .captures_iter(text)
        .filter(|cap| cap[2].starts_with(search_url))
        .map(|cap| cap[1].to_string())
        .collect()
}
