//! Single reference to markdown link

use crate::shorten::{book_code, shorten};
use crate::syntax::normalize_syntax;
use crate::tables::ReferenceTables;
use crate::text::ends_with_digit;

/// Convert one reference into a markdown link.
///
/// Empty input is returned as is. Text that does not end in a digit is
/// treated as prose and emphasised instead of linked.
pub fn convert(reference: &str, tables: &ReferenceTables) -> String {
    if reference.is_empty() {
        return String::new();
    }
    if !ends_with_digit(reference) {
        return format!("*{}*", reference);
    }

    let seed = apply_replacements(reference, tables);
    let forms = normalize_syntax(&seed);

    let shortened = shorten(&forms.url, tables);
    let pin_edition = book_code(&shortened).is_some_and(|code| tables.is_deuterocanonical(code));
    let target = tables.link_target(&shortened.trim().replace(' ', "+"), pin_edition);

    let anchor = if forms.display.trim().is_empty() {
        reference
    } else {
        forms.display.as_str()
    };
    format!("[{}]({})", anchor, target)
}

/// Service-specific literal fixes, giving the anchor seed
fn apply_replacements(reference: &str, tables: &ReferenceTables) -> String {
    tables
        .replacements()
        .iter()
        .fold(reference.to_string(), |acc, (from, to)| {
            replace_whole_locator(&acc, from, to)
        })
}

/// Literal replace, except that a key ending in a digit must end the
/// number it matches: "Psalm 151" is fixed, "Psalm 151:1-7" is not.
fn replace_whole_locator(text: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return text.to_string();
    }
    let numeric_key = from.ends_with(|c: char| c.is_ascii_digit());

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (idx, _) in text.match_indices(from) {
        let end = idx + from.len();
        if numeric_key && text[end..].starts_with(|c: char| c.is_ascii_digit() || c == ':') {
            continue;
        }
        out.push_str(&text[last..idx]);
        out.push_str(to);
        last = end;
    }
    out.push_str(&text[last..]);
    out
}
