//! Patient summary CLI
//!
//! Reads the record set produced by an external search (a JSON array of
//! resources, or a searchset Bundle) and writes the composed summary
//! document bundle as JSON.

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use summa_models::{Bundle, Resource};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ips-summary",
    about = "Compose a patient summary document bundle from a set of clinical records",
    version
)]
struct Cli {
    /// Input file holding a JSON array of resources or a searchset Bundle.
    /// Reads stdin when omitted. The subject Patient must be the first
    /// record.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file for the document bundle. Writes stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let raw = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let records = parse_records(&raw)?;
    tracing::info!(records = records.len(), "composing patient summary");

    let bundle = summa_composer::build_summary(records).context("summary composition failed")?;
    tracing::info!(entries = bundle.entry.len(), "composed document bundle");

    let json = if cli.pretty {
        serde_json::to_string_pretty(&bundle)?
    } else {
        serde_json::to_string(&bundle)?
    };

    match &cli.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}

fn parse_records(raw: &str) -> anyhow::Result<Vec<Resource>> {
    let value: serde_json::Value = serde_json::from_str(raw).context("input is not valid JSON")?;

    if value.get("resourceType").and_then(|v| v.as_str()) == Some("Bundle") {
        let bundle: Bundle =
            serde_json::from_value(value).context("input is not a valid Bundle")?;
        Ok(bundle.entry_resources()?)
    } else {
        serde_json::from_value(value)
            .context("expected a JSON array of resources or a searchset Bundle")
    }
}
