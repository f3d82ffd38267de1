//! # Titulares
//!
//! Polls news feeds spread over an editorial scale, keeps the latest
//! headlines of each, and writes them to a CSV file and optionally a MySQL
//! table.
//!
//! ## Usage
//!
//! ```sh
//! titulares -o data/noticias_medios.csv
//! titulares report --top 15
//! titulares report --from-db
//! ```
//!
//! `RUST_LOG` controls verbosity (default `info`).

use clap::Parser;
use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use titulares::analysis::Report;
use titulares::feeds::HttpFeedClient;
use titulares::outputs::{database, export};
use titulares::{AppConfig, ConfigError, pipeline};
use tracing::{debug, info, instrument};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::{Cli, Command};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();
    init_tracing(args.log_file.as_deref())?;

    let start_time = std::time::Instant::now();
    info!("titulares starting up");
    debug!(?args, "Parsed CLI arguments");

    let config = AppConfig::load(args.config.as_deref(), &args.overrides())?;

    match args.command {
        Some(Command::Report { top, from_db }) => {
            let records = if from_db {
                let db = config.database.as_ref().ok_or(ConfigError::DatabaseRequired)?;
                database::load_records(db).await?
            } else {
                let records = export::read_csv(&config.output_path)?;
                info!(
                    path = %config.output_path.display(),
                    records = records.len(),
                    "Loaded export for report"
                );
                records
            };
            print!("{}", Report::build(&records, top));
        }
        None => {
            let client = HttpFeedClient::new(&config.user_agent, config.timeout)?;
            let summary = pipeline::run_ingest(&config, client).await?;
            println!(
                "{} headlines from {} sources saved to {} ({} failed)",
                summary.total_records,
                summary.sources.len(),
                summary.csv_path,
                summary.failed
            );
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        elapsed_secs = elapsed.as_secs_f64(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Execution complete"
    );

    Ok(())
}

/// Console logging always; a plain-text copy in `log_file` when given.
fn init_tracing(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tfmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_timer(UtcTime::rfc_3339())
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tfmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .with_timer(UtcTime::rfc_3339()),
        )
        .with(file_layer)
        .try_init()?;
    Ok(())
}
