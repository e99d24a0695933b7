//! Lectionary registry and result cache
//!
//! Built once at startup and shared by reference. Each source sits behind
//! its own lock, so concurrent requests for one source wait on a single
//! regeneration while other sources stay available.

use crate::error::SourceError;
use crate::lectionary::{Lectionary, PageLectionary, SourceConfig};
use crate::message::Message;
use crate::tables::ReferenceTables;
use chrono::{DateTime, Local, TimeDelta, Utc};
use futures::future::join_all;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error};

/// Configuration for the registry
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Results older than this are fetched again
    pub cache_duration: TimeDelta,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            cache_duration: TimeDelta::hours(1),
            timeout: Duration::from_secs(30),
            user_agent: concat!("lector/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

struct Entry {
    name: String,
    lectionary: Mutex<Box<dyn Lectionary>>,
}

pub struct Registry {
    entries: Vec<Entry>,
    aliases: HashMap<String, usize>,
    client: reqwest::Client,
    cache_duration: TimeDelta,
}

impl Registry {
    pub fn new(config: &RegistryConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Registry {
            entries: Vec::new(),
            aliases: HashMap::new(),
            client,
            cache_duration: config.cache_duration,
        })
    }

    /// Registry holding a `PageLectionary` per source config, in order
    pub fn from_sources(
        sources: Vec<SourceConfig>,
        config: &RegistryConfig,
    ) -> Result<Self, SourceError> {
        let mut registry = Registry::new(config)?;
        for source in sources {
            let name = source.name.clone();
            let aliases = source.aliases.clone();
            registry.register(&name, &aliases, Box::new(PageLectionary::new(source)?))?;
        }
        Ok(registry)
    }

    /// Add a source under its display name and aliases; returns its index
    pub fn register(
        &mut self,
        name: &str,
        aliases: &[String],
        lectionary: Box<dyn Lectionary>,
    ) -> Result<usize, SourceError> {
        let index = self.entries.len();
        let keys: Vec<String> = std::iter::once(name)
            .chain(aliases.iter().map(String::as_str))
            .map(str::to_lowercase)
            .collect();

        for key in &keys {
            if self.aliases.contains_key(key) {
                return Err(SourceError::DuplicateAlias(key.clone()));
            }
        }
        for key in keys {
            self.aliases.insert(key, index);
        }

        self.entries.push(Entry {
            name: name.to_string(),
            lectionary: Mutex::new(lectionary),
        });
        Ok(index)
    }

    /// Index for a name or alias, case-insensitive
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.aliases.get(&name.trim().to_lowercase()).copied()
    }

    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.name.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Aliases registered for `index`, sorted
    pub fn aliases_of(&self, index: usize) -> Vec<&str> {
        let mut aliases: Vec<&str> = self
            .aliases
            .iter()
            .filter(|(_, &i)| i == index)
            .map(|(alias, _)| alias.as_str())
            .collect();
        aliases.sort_unstable();
        aliases
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rendered messages for a source, fetching them if stale
    pub async fn get(&self, index: usize, tables: &ReferenceTables) -> Option<Vec<Message>> {
        self.get_at(index, Utc::now(), tables).await
    }

    /// `get` as of `now`. `None` for an unknown index or a failed fetch.
    pub async fn get_at(
        &self,
        index: usize,
        now: DateTime<Utc>,
        tables: &ReferenceTables,
    ) -> Option<Vec<Message>> {
        let entry = self.entries.get(index)?;
        let mut lectionary = entry.lectionary.lock().await;

        if self.needs_regeneration(&**lectionary, now) {
            let today = now.with_timezone(&Local).date_naive();
            if let Err(e) = lectionary.regenerate(&self.client, today).await {
                error!(source = %entry.name, error = %e, "lectionary not regenerated");
                return None;
            }
            debug!(source = %entry.name, "regenerated");
        }

        Some(lectionary.build_messages(tables))
    }

    /// Regenerate every stale source concurrently
    pub async fn regenerate_all(&self) {
        self.regenerate_all_at(Utc::now()).await
    }

    pub async fn regenerate_all_at(&self, now: DateTime<Utc>) {
        let today = now.with_timezone(&Local).date_naive();
        let tasks = self.entries.iter().map(|entry| async move {
            let mut lectionary = entry.lectionary.lock().await;
            if self.needs_regeneration(&**lectionary, now) {
                if let Err(e) = lectionary.regenerate(&self.client, today).await {
                    error!(source = %entry.name, error = %e, "lectionary not regenerated");
                }
            }
        });
        join_all(tasks).await;
        debug!("regenerated all lectionaries");
    }

    fn needs_regeneration(&self, lectionary: &dyn Lectionary, now: DateTime<Utc>) -> bool {
        if !lectionary.is_ready() {
            return true;
        }
        match lectionary.last_regeneration() {
            Some(last) => now - last > self.cache_duration,
            None => true,
        }
    }
}
