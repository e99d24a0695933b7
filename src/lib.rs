//! lector: scripture reference links for daily readings
//!
//! Modules:
//! - normalize, syntax, shorten, link: the reference pipeline
//! - extract, combined: inline markers and combined links
//! - lectionary, registry: reading sources and their cache
//! - links, readings: CLI commands

pub mod citation;
pub mod combined;
pub mod dates;
pub mod error;
pub mod extract;
pub mod lectionary;
pub mod link;
pub mod links;
pub mod message;
pub mod normalize;
pub mod readings;
pub mod registry;
pub mod shorten;
pub mod syntax;
pub mod tables;
pub mod text;

pub use combined::{build_combined_link, extract_and_build_combined_link, DEFAULT_ANCHOR};
pub use error::{SourceError, TableError};
pub use extract::{convert_inline, extract_linked_references, extract_references};
pub use lectionary::{load_sources, Lectionary, PageLectionary, SourceConfig};
pub use link::convert;
pub use message::{Author, Field, Message};
pub use normalize::{normalize, Dialect};
pub use registry::{Registry, RegistryConfig};
pub use shorten::shorten;
pub use syntax::{normalize_syntax, NormalizedReference};
pub use tables::ReferenceTables;
