//! Canonical book names to search-service codes
//!
//! Optimised for Bible Gateway queries. The input must already use
//! canonical book names; anything else is logged and left unshortened.

use crate::citation::Citation;
use crate::tables::ReferenceTables;
use crate::text::title_case;
use tracing::warn;

/// Compact a canonical reference for a search query.
///
/// "Genesis 1:1; 2:1" -> "Ge 1:1;2:1"
pub fn shorten(reference: &str, tables: &ReferenceTables) -> String {
    let compact = reference.replace(", ", ",").replace("; ", ";");
    let text = title_case(&compact);

    if !starts_with_known_book(&text, tables) {
        warn!(reference, "reference does not start with a known book; left unshortened");
    }

    tables
        .shortening()
        .iter()
        .fold(text, |acc, (name, code)| acc.replace(name, code))
}

/// Book code of a shortened reference, without any leading ordinal
pub fn book_code(shortened: &str) -> Option<&str> {
    Citation::split(shortened).map(|c| c.base_book())
}

fn starts_with_known_book(text: &str, tables: &ReferenceTables) -> bool {
    match Citation::split(text) {
        Some(citation) => tables.is_known_book(citation.base_book()),
        None => false,
    }
}
