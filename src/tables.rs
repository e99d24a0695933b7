//! Lookup tables for reference normalization
//!
//! Abbreviation dialects, literal fixes, the shortening table and the
//! deuterocanon set. Loaded from YAML; a default copy is embedded.

use crate::error::TableError;
use crate::text::title_case;
use once_cell::sync::Lazy;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use url::Url;

const BUILTIN_TABLES: &str = include_str!("../data/tables.yaml");

static BUILTIN: Lazy<ReferenceTables> = Lazy::new(|| {
    ReferenceTables::from_yaml(BUILTIN_TABLES).expect("embedded tables.yaml is valid")
});

/// A string-to-string map that keeps the order entries were declared in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedTable(Vec<(String, String)>);

impl OrderedTable {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for OrderedTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        OrderedTable(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for OrderedTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = OrderedTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    entries.push((key, value));
                }
                Ok(OrderedTable(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// On-disk layout of the tables file
#[derive(Debug, Deserialize)]
struct TablesFile {
    search_url: String,
    edition: String,
    uppercase: OrderedTable,
    mixed: OrderedTable,
    #[serde(default)]
    replacements: OrderedTable,
    shortening: OrderedTable,
    #[serde(default)]
    deuterocanon: Vec<String>,
}

/// Validated lookup tables shared by every pipeline stage
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    search_url: String,
    edition: String,
    uppercase: OrderedTable,
    mixed: OrderedTable,
    replacements: OrderedTable,
    /// Title-cased canonical name -> short code
    shortening: OrderedTable,
    /// Short codes of deuterocanonical books
    deuterocanon: HashSet<String>,
    /// Every name and code the shortener recognises as a book
    known_books: HashSet<String>,
}

impl ReferenceTables {
    /// Tables embedded in the binary
    pub fn builtin() -> &'static ReferenceTables {
        &BUILTIN
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path).map_err(|source| TableError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, TableError> {
        let file: TablesFile = serde_yaml::from_str(content)?;
        Self::from_file(file)
    }

    fn from_file(file: TablesFile) -> Result<Self, TableError> {
        let parsed = Url::parse(&file.search_url).map_err(|e| TableError::InvalidSearchUrl {
            url: file.search_url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(TableError::InvalidSearchUrl {
                url: file.search_url,
                reason: "not an absolute URL".to_string(),
            });
        }

        let uppercase: OrderedTable = file
            .uppercase
            .iter()
            .map(|(k, v)| (k.to_uppercase(), v.to_string()))
            .collect();
        check_first_match_order(&uppercase)?;

        let shortening: OrderedTable = file
            .shortening
            .iter()
            .map(|(k, v)| (title_case(k), v.to_string()))
            .collect();
        check_shortening(&shortening)?;

        let codes: HashMap<&str, &str> = shortening.iter().collect();
        let mut deuterocanon = HashSet::new();
        for book in &file.deuterocanon {
            let code = codes
                .get(title_case(book).as_str())
                .ok_or_else(|| TableError::UnknownDeuterocanon(book.clone()))?;
            deuterocanon.insert(code.to_string());
        }

        let known_books = shortening
            .iter()
            .flat_map(|(name, code)| [name.to_string(), code.to_string()])
            .collect();

        Ok(ReferenceTables {
            search_url: file.search_url,
            edition: file.edition,
            uppercase,
            mixed: file.mixed,
            replacements: file.replacements,
            shortening,
            deuterocanon,
            known_books,
        })
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Query suffix that pins the edition carrying the deuterocanon
    pub fn edition_param(&self) -> String {
        format!("&version={}", self.edition)
    }

    pub fn uppercase(&self) -> &OrderedTable {
        &self.uppercase
    }

    pub fn mixed(&self) -> &OrderedTable {
        &self.mixed
    }

    pub fn replacements(&self) -> &OrderedTable {
        &self.replacements
    }

    pub fn shortening(&self) -> &OrderedTable {
        &self.shortening
    }

    /// Exact membership on a short book code (without its leading number)
    pub fn is_deuterocanonical(&self, code: &str) -> bool {
        self.deuterocanon.contains(code)
    }

    /// True when `book` is a canonical name or a short code
    pub fn is_known_book(&self, book: &str) -> bool {
        self.known_books.contains(book)
    }

    /// Search URL for an already-encoded query
    pub fn link_target(&self, query: &str, pin_edition: bool) -> String {
        if pin_edition {
            format!("{}{}{}", self.search_url, query, self.edition_param())
        } else {
            format!("{}{}", self.search_url, query)
        }
    }
}

/// A first-match table must try a key before any shorter key that would
/// match inside it.
fn check_first_match_order(table: &OrderedTable) -> Result<(), TableError> {
    let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
    for (i, earlier) in keys.iter().enumerate() {
        let needle = format!("{} ", earlier);
        for later in &keys[i + 1..] {
            if format!("{} ", later).contains(&needle) {
                return Err(TableError::ShadowedAbbreviation {
                    earlier: earlier.to_string(),
                    later: later.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn check_shortening(table: &OrderedTable) -> Result<(), TableError> {
    let mut codes: HashMap<&str, &str> = HashMap::new();
    for (name, code) in table.iter() {
        if let Some(previous) = codes.insert(code, name) {
            return Err(TableError::DuplicateCode {
                code: code.to_string(),
                first: previous.to_string(),
                second: name.to_string(),
            });
        }
    }

    let names: Vec<&str> = table.iter().map(|(n, _)| n).collect();
    for a in &names {
        for b in &names {
            if a != b && b.contains(a) {
                return Err(TableError::OverlappingNames {
                    inner: a.to_string(),
                    outer: b.to_string(),
                });
            }
        }
    }
    Ok(())
}
