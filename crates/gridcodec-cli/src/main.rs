//! gridcodec demo
//!
//! Loads a record file, shows the flattened editable grid, optionally
//! replays a file of grid events against it, and prints the records read
//! back from the grid.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use gridcodec_session::GridSession;
use serde_json::json;
use std::path::PathBuf;
use tracing::{info, warn};

mod config;
mod loader;
mod logging;
mod render;

use config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Aligned text grid followed by pretty JSON records
    Table,
    /// One JSON document with the grid, the records and any read-back errors
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "gridcodec", version, about = "View and edit typed records as a flat string grid")]
struct Cli {
    /// JSON array or JSON Lines file of records
    records: PathBuf,

    /// YAML configuration file (defaults to ./gridcodec.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON array or JSON Lines file of grid events to replay
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// Show only these columns, in this order
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref()).context("loading configuration")?;
    logging::init(&config.logging)?;

    let records = loader::load_records(&cli.records, config.input.infer_dates)?;
    let options = config.session_options();
    let mut session = if cli.columns.is_empty() {
        GridSession::new(&records, options)
    } else {
        GridSession::with_columns(&records, &cli.columns, options)
    }
    .with_context(|| format!("building grid from {}", cli.records.display()))?;

    if cli.output == OutputFormat::Table {
        println!("{}\n", render::render_table(&session.table()));
    }

    if let Some(path) = &cli.events {
        let events = loader::load_events(path)?;
        let mut refused = 0;
        for event in events {
            match session.apply(event) {
                Ok(outcome) => info!(outcome = ?outcome, "event applied"),
                Err(e) => {
                    refused += 1;
                    warn!(error = %e, "event refused");
                }
            }
        }
        info!(refused, rows = session.row_count(), "event replay finished");

        if cli.output == OutputFormat::Table {
            println!("After edits:\n{}\n", render::render_table(&session.table()));
        }
    }

    let (data, errors) = match session.updated_data() {
        Ok(data) => (data, Vec::new()),
        Err(e) => {
            warn!(error = %e, "read-back failed, keeping unparsed cells as text");
            session.updated_data_lossy()
        }
    };

    match cli.output {
        OutputFormat::Table => {
            println!("Grid data updated:");
            println!("{}", serde_json::to_string_pretty(&data)?);
            for e in &errors {
                eprintln!("warning: {}", e);
            }
        }
        OutputFormat::Json => {
            let document = json!({
                "grid": session.table(),
                "schema": session.schema(),
                "data": data,
                "errors": errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}
