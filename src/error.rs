//! Error types for table loading and lectionary sources

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read tables file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse tables: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid search URL {url}: {reason}")]
    InvalidSearchUrl { url: String, reason: String },

    #[error("Abbreviation '{earlier}' is checked before '{later}' and would shadow it")]
    ShadowedAbbreviation { earlier: String, later: String },

    #[error("Book name '{inner}' occurs inside '{outer}'")]
    OverlappingNames { inner: String, outer: String },

    #[error("Short code '{code}' is used by both '{first}' and '{second}'")]
    DuplicateCode {
        code: String,
        first: String,
        second: String,
    },

    #[error("Deuterocanon book '{0}' is missing from the shortening table")]
    UnknownDeuterocanon(String),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read sources file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse sources: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid selector '{0}'")]
    Selector(String),

    #[error("Invalid date template '{0}'")]
    Template(String),

    #[error("Duplicate source name or alias '{0}'")]
    DuplicateAlias(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("No readings found at {0}")]
    Empty(String),
}
