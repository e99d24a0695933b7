//! Book abbreviation expansion
//!
//! Two dialects with different semantics:
//! - `Uppercase`: liturgical all-caps codes ("GN 1:1"). The input is
//!   upper-cased, the first table key followed by a space wins, and the
//!   result is title-cased.
//! - `Mixed`: informal codes ("Matt 5:1  & Lk 1:1"). Every rule is applied
//!   in table order, punctuation fixes included, without case folding.

use crate::tables::ReferenceTables;
use crate::text::title_case;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Uppercase,
    Mixed,
}

/// Expand the book abbreviation in `reference` to its canonical name.
///
/// An unknown abbreviation is not an error: the input passes through
/// (title-cased for the uppercase dialect).
pub fn normalize(reference: &str, dialect: Dialect, tables: &ReferenceTables) -> String {
    match dialect {
        Dialect::Uppercase => normalize_uppercase(reference, tables),
        Dialect::Mixed => normalize_mixed(reference, tables),
    }
}

fn normalize_uppercase(reference: &str, tables: &ReferenceTables) -> String {
    let mut reference = reference.to_uppercase();
    for (abbrev, full_name) in tables.uppercase().iter() {
        if reference.contains(&format!("{} ", abbrev)) {
            reference = reference.replace(abbrev, full_name);
            break;
        }
    }
    title_case(&reference)
}

fn normalize_mixed(reference: &str, tables: &ReferenceTables) -> String {
    tables
        .mixed()
        .iter()
        .fold(reference.to_string(), |acc, (from, to)| acc.replace(from, to))
}
