//! Source commands: sources, readings
//!
//! Both print one compact JSON document on stdout for scripts and bots.

use crate::lectionary::{load_sources, SourceConfig};
use crate::message::Message;
use crate::registry::{Registry, RegistryConfig};
use crate::tables::ReferenceTables;
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

#[derive(Args)]
pub struct SourcesArgs {}

#[derive(Args)]
pub struct ReadingsArgs {
    /// Source name or alias (see `lector sources`)
    #[arg(value_name = "NAME")]
    name: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// User-Agent header sent to the source
    #[arg(long)]
    user_agent: Option<String>,
}

/// One configured source (compact)
#[derive(Debug, Serialize)]
pub struct SourceEntry {
    pub name: String,
    pub aliases: Vec<String>,
    pub url: String,
}

/// Readings of one source (compact)
#[derive(Debug, Serialize)]
pub struct ReadingsReport {
    pub source: String,
    pub messages: Vec<Message>,
}

fn sources_from(path: Option<&Path>) -> Result<Vec<SourceConfig>> {
    load_sources(path).with_context(|| match path {
        Some(path) => format!("Failed to load sources from {}", path.display()),
        None => "Failed to load built-in sources".to_string(),
    })
}

/// Run the sources command
pub fn run_sources(_args: SourcesArgs, sources: Option<&Path>) -> Result<()> {
    let entries: Vec<SourceEntry> = sources_from(sources)?
        .into_iter()
        .map(|source| SourceEntry {
            name: source.name,
            aliases: source.aliases,
            url: source.url,
        })
        .collect();

    println!("{}", serde_json::to_string(&entries)?);
    Ok(())
}

/// Run the readings command
pub async fn run_readings(
    args: ReadingsArgs,
    sources: Option<&Path>,
    tables: &ReferenceTables,
) -> Result<()> {
    let mut config = RegistryConfig {
        timeout: Duration::from_secs(args.timeout),
        ..RegistryConfig::default()
    };
    if let Some(user_agent) = args.user_agent {
        config.user_agent = user_agent;
    }

    let registry = Registry::from_sources(sources_from(sources)?, &config)
        .context("Failed to build source registry")?;

    let Some(index) = registry.index_of(&args.name) else {
        eprintln!("Unknown source: {}", args.name);
        eprintln!("Available: {}", registry.names().collect::<Vec<_>>().join(", "));
        std::process::exit(1);
    };
    let name = registry.name_of(index).unwrap_or(args.name.as_str()).to_string();

    eprintln!("Fetching readings from {}...", name);

    let messages = registry
        .get(index, tables)
        .await
        .with_context(|| format!("No readings available from {}", name))?;

    let report = ReadingsReport {
        source: name,
        messages,
    };
    println!("{}", serde_json::to_string(&report)?);

    eprintln!("Done: {} message(s)", report.messages.len());
    Ok(())
}
