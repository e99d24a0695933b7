//! One link covering every reference in a message

use crate::extract::extract_references;
use crate::shorten::{book_code, shorten};
use crate::syntax::url_form;
use crate::tables::ReferenceTables;

pub const DEFAULT_ANCHOR: &str = "Read all on Bible Gateway";

/// Build a single link whose query lists every reference in input order.
///
/// Returns an empty string when there is nothing to link.
pub fn build_combined_link<S: AsRef<str>>(
    references: &[S],
    anchor_text: &str,
    tables: &ReferenceTables,
) -> String {
    if references.is_empty() {
        return String::new();
    }

    let shortened: Vec<String> = references
        .iter()
        .map(|reference| shorten(&url_form(reference.as_ref()), tables))
        .collect();

    let pin_edition = shortened
        .iter()
        .filter_map(|s| book_code(s))
        .any(|code| tables.is_deuterocanonical(code));

    let query = shortened.join(", ").replace(' ', "+");
    format!("[{}]({})", anchor_text, tables.link_target(&query, pin_edition))
}

/// Extract marked citations from `text` and build their combined link
pub fn extract_and_build_combined_link(
    text: &str,
    anchor_text: &str,
    tables: &ReferenceTables,
) -> String {
    build_combined_link(&extract_references(text), anchor_text, tables)
}
