//! Lectionary sources
//!
//! A source produces the day's readings on demand and renders them as
//! messages. Sources are described by data (`sources.yaml`): the page URL
//! template, a CSS selector for the reading nodes and an optional
//! abbreviation dialect.

use crate::combined::DEFAULT_ANCHOR;
use crate::dates;
use crate::error::SourceError;
use crate::link::convert;
use crate::message::{Author, Message};
use crate::normalize::{normalize, Dialect};
use crate::tables::ReferenceTables;
use async_trait::async_trait;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, Utc};
use scraper::{Html, Selector};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

const BUILTIN_SOURCES: &str = include_str!("../data/sources.yaml");

/// Capability shared by every lectionary source
#[async_trait]
pub trait Lectionary: Send + Sync {
    fn id(&self) -> &str;

    /// Fetch and extract the readings for `today`
    async fn regenerate(
        &mut self,
        client: &reqwest::Client,
        today: NaiveDate,
    ) -> Result<(), SourceError>;

    fn is_ready(&self) -> bool;

    fn last_regeneration(&self) -> Option<DateTime<Utc>>;

    fn clear(&mut self);

    /// Rendered messages; empty when not ready
    fn build_messages(&self, tables: &ReferenceTables) -> Vec<Message>;
}

/// One entry of sources.yaml
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub id: String,
    /// Display name, also accepted as a lookup key
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// strftime template of the day's page
    pub url: String,
    /// CSS selector of the nodes holding the readings, one per line
    pub selector: String,
    #[serde(default)]
    pub dialect: Option<Dialect>,
    /// Message title; `{date}` expands to the long date
    #[serde(default = "default_title")]
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub footer: Option<String>,
    #[serde(default)]
    pub color: Option<u32>,
}

fn default_title() -> String {
    "{date}".to_string()
}

impl SourceConfig {
    fn validate(&self) -> Result<(), SourceError> {
        Selector::parse(&self.selector).map_err(|_| SourceError::Selector(self.selector.clone()))?;
        if StrftimeItems::new(&self.url).any(|item| matches!(item, Item::Error)) {
            return Err(SourceError::Template(self.url.clone()));
        }
        Ok(())
    }

    pub fn page_url(&self, today: NaiveDate) -> String {
        today.format(&self.url).to_string()
    }
}

/// Load source configs from `path`, or the embedded defaults
pub fn load_sources(path: Option<&Path>) -> Result<Vec<SourceConfig>, SourceError> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.display().to_string(),
            source,
        })?,
        None => BUILTIN_SOURCES.to_string(),
    };
    parse_sources(&content)
}

pub fn parse_sources(content: &str) -> Result<Vec<SourceConfig>, SourceError> {
    let sources: Vec<SourceConfig> = serde_yaml::from_str(content)?;
    for source in &sources {
        source.validate()?;
    }
    Ok(sources)
}

#[derive(Debug, Clone)]
struct Snapshot {
    today: NaiveDate,
    url: String,
    readings: Vec<String>,
}

/// A source whose readings are the text of selected page nodes
pub struct PageLectionary {
    config: SourceConfig,
    snapshot: Option<Snapshot>,
    last_regeneration: Option<DateTime<Utc>>,
}

impl PageLectionary {
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        config.validate()?;
        Ok(PageLectionary {
            config,
            snapshot: None,
            last_regeneration: None,
        })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Raw reading lines of the last successful fetch
    pub fn readings(&self) -> &[String] {
        self.snapshot
            .as_ref()
            .map(|s| s.readings.as_slice())
            .unwrap_or_default()
    }

    fn render_reading(&self, reading: &str, tables: &ReferenceTables) -> String {
        match self.config.dialect {
            Some(dialect) => convert(&normalize(reading, dialect, tables), tables),
            None => convert(reading, tables),
        }
    }
}

#[async_trait]
impl Lectionary for PageLectionary {
    fn id(&self) -> &str {
        &self.config.id
    }

    async fn regenerate(
        &mut self,
        client: &reqwest::Client,
        today: NaiveDate,
    ) -> Result<(), SourceError> {
        self.clear();
        let url = self.config.page_url(today);
        debug!(source = %self.config.id, %url, "fetching readings");

        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status().as_u16(),
                url,
            });
        }
        let body = response.text().await?;

        let readings = extract_readings(&body, &self.config.selector)?;
        if readings.is_empty() {
            return Err(SourceError::Empty(url));
        }

        self.snapshot = Some(Snapshot { today, url, readings });
        self.last_regeneration = Some(Utc::now());
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.snapshot.is_some()
    }

    fn last_regeneration(&self) -> Option<DateTime<Utc>> {
        self.last_regeneration
    }

    fn clear(&mut self) {
        self.snapshot = None;
    }

    fn build_messages(&self, tables: &ReferenceTables) -> Vec<Message> {
        let Some(snapshot) = &self.snapshot else {
            return Vec::new();
        };

        let description = snapshot
            .readings
            .iter()
            .map(|reading| self.render_reading(reading, tables))
            .collect::<Vec<_>>()
            .join("\n");

        let mut message = Message {
            title: self
                .config
                .title
                .replace("{date}", &dates::auto_expand(snapshot.today, &description)),
            description,
            color: self.config.color,
            author: Some(Author {
                name: self.config.author.clone(),
                url: Some(snapshot.url.clone()),
            }),
            footer: self.config.footer.clone(),
            fields: Vec::new(),
        };
        message.inject_combined_link(tables, DEFAULT_ANCHOR);
        vec![message]
    }
}

/// Text of every selected node, split into whitespace-collapsed lines
fn extract_readings(html: &str, selector: &str) -> Result<Vec<String>, SourceError> {
    let parsed = Selector::parse(selector).map_err(|_| SourceError::Selector(selector.to_string()))?;
    let document = Html::parse_document(html);

    let readings = document
        .select(&parsed)
        .flat_map(|node| {
            node.text()
                .collect::<String>()
                .lines()
                .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
        })
        .collect();
    Ok(readings)
}
