//! lector CLI
//!
//! Turns scripture citations into search links and fetches daily readings.

use anyhow::Result;
use clap::{Parser, Subcommand};
use lector::links::{
    resolve_tables, run_combined, run_convert, run_inline, run_normalize, CombinedArgs,
    ConvertArgs, InlineArgs, NormalizeArgs,
};
use lector::readings::{run_readings, run_sources, ReadingsArgs, SourcesArgs};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lector")]
#[command(version)]
#[command(about = "Scripture reference links for daily readings")]
#[command(long_about = "Converts citations into Bible Gateway links.\n\nCommands:\n  convert    Link one or more references\n  normalize  Expand dialect abbreviations\n  inline     Replace <a>REFERENCE</a> markers with links\n  combined   One link for every marked reference\n  sources    List lectionary sources\n  readings   Fetch today's readings from a source")]
struct Cli {
    /// Lookup tables YAML (defaults to the built-in tables)
    #[arg(long, global = true, env = "LECTOR_TABLES")]
    tables: Option<PathBuf>,

    /// Lectionary sources YAML (defaults to the built-in sources)
    #[arg(long, global = true, env = "LECTOR_SOURCES")]
    sources: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert references into markdown links
    Convert(ConvertArgs),
    /// Expand an abbreviation dialect into canonical book names
    Normalize(NormalizeArgs),
    /// Replace inline <a>REFERENCE</a> markers with links
    Inline(InlineArgs),
    /// Build one link covering every marked reference
    Combined(CombinedArgs),
    /// List configured lectionary sources
    Sources(SourcesArgs),
    /// Fetch and render today's readings from a source
    Readings(ReadingsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let Cli {
        tables,
        sources,
        command,
    } = Cli::parse();
    let tables_path = tables.as_deref();
    let sources_path = sources.as_deref();

    match command {
        Commands::Convert(args) => {
            let tables = resolve_tables(tables_path)?;
            run_convert(args, &tables)
        }
        Commands::Normalize(args) => {
            let tables = resolve_tables(tables_path)?;
            run_normalize(args, &tables)
        }
        Commands::Inline(args) => {
            let tables = resolve_tables(tables_path)?;
            run_inline(args, &tables).await
        }
        Commands::Combined(args) => {
            let tables = resolve_tables(tables_path)?;
            run_combined(args, &tables).await
        }
        Commands::Sources(args) => run_sources(args, sources_path),
        Commands::Readings(args) => {
            let tables = resolve_tables(tables_path)?;
            run_readings(args, sources_path, &tables).await
        }
    }
}
