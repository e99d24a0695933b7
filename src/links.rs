//! Link commands: convert, normalize, inline, combined
//!
//! Text in, text out. Progress and usage go to stderr.

use crate::combined::{extract_and_build_combined_link, DEFAULT_ANCHOR};
use crate::extract::convert_inline;
use crate::link::convert;
use crate::normalize::{normalize, Dialect};
use crate::tables::ReferenceTables;
use anyhow::{Context, Result};
use clap::Args;
use std::borrow::Cow;
use std::io::{self, Read};
use std::path::Path;
use tokio::fs;

#[derive(Args)]
pub struct ConvertArgs {
    /// References to convert, e.g. "Genesis 1:1-5"
    #[arg(value_name = "REFERENCE", required = true)]
    references: Vec<String>,
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// Abbreviation dialect of the input
    #[arg(short, long, value_enum)]
    dialect: Dialect,

    /// References to normalize
    #[arg(value_name = "REFERENCE", required = true)]
    references: Vec<String>,

    /// Convert the normalized reference into a link
    #[arg(long)]
    link: bool,
}

#[derive(Args)]
pub struct InlineArgs {
    /// File with <a>REFERENCE</a> markers
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Read text from stdin
    #[arg(long)]
    stdin: bool,
}

#[derive(Args)]
pub struct CombinedArgs {
    /// File with <a>REFERENCE</a> markers
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Read text from stdin
    #[arg(long)]
    stdin: bool,

    /// Anchor text of the combined link
    #[arg(long, default_value = DEFAULT_ANCHOR)]
    anchor: String,
}

/// Tables from `path`, or the embedded defaults
pub fn resolve_tables(path: Option<&Path>) -> Result<Cow<'static, ReferenceTables>> {
    match path {
        Some(path) => {
            let tables = ReferenceTables::load(path)
                .with_context(|| format!("Failed to load tables from {}", path.display()))?;
            Ok(Cow::Owned(tables))
        }
        None => Ok(Cow::Borrowed(ReferenceTables::builtin())),
    }
}

/// Run the convert command
pub fn run_convert(args: ConvertArgs, tables: &ReferenceTables) -> Result<()> {
    for reference in &args.references {
        println!("{}", convert(reference, tables));
    }
    Ok(())
}

/// Run the normalize command
pub fn run_normalize(args: NormalizeArgs, tables: &ReferenceTables) -> Result<()> {
    for reference in &args.references {
        let normalized = normalize(reference, args.dialect, tables);
        if args.link {
            println!("{}", convert(&normalized, tables));
        } else {
            println!("{}", normalized);
        }
    }
    Ok(())
}

/// Run the inline command
pub async fn run_inline(args: InlineArgs, tables: &ReferenceTables) -> Result<()> {
    let text = read_input("inline", args.file.as_deref(), args.stdin).await?;
    print!("{}", convert_inline(&text, tables));
    Ok(())
}

/// Run the combined command
pub async fn run_combined(args: CombinedArgs, tables: &ReferenceTables) -> Result<()> {
    let text = read_input("combined", args.file.as_deref(), args.stdin).await?;
    let link = extract_and_build_combined_link(&text, &args.anchor, tables);
    if link.is_empty() {
        eprintln!("No references found.");
        std::process::exit(1);
    }
    println!("{}", link);
    Ok(())
}

/// Get text from a file or stdin
async fn read_input(command: &str, file: Option<&str>, stdin: bool) -> Result<String> {
    if stdin {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }

    if let Some(file) = file {
        return fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read file: {}", file));
    }

    eprintln!("Usage:");
    eprintln!("  lector {} <file>    Read text from file", command);
    eprintln!("  lector {} --stdin   Read text from stdin", command);
    std::process::exit(1);
}
