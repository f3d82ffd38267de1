//! Command-line interface definitions for Titulares.
//!
//! Every option can also come from an environment variable, which is how the
//! database URL is meant to be supplied.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use titulares::Overrides;

/// Command-line arguments.
///
/// Without a subcommand the program runs one ingestion.
///
/// # Examples
///
/// ```sh
/// # Ingest with the built-in sources into ./noticias_medios.csv
/// titulares
///
/// # Custom sources and a database
/// DATABASE_URL=mysql://root:pw@localhost/proyecto_noticias titulares -c titulares.yaml
///
/// # Print the report for an existing export
/// titulares --output data/noticias_medios.csv report --top 15
///
/// # ... or for everything stored in the table
/// titulares --database-url mysql://root:pw@localhost/proyecto_noticias report --from-db
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "TITULARES_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// CSV export path (written by ingest, read by report)
    #[arg(short, long, env = "TITULARES_OUTPUT", global = true)]
    pub output: Option<PathBuf>,

    /// Also write log lines to this file
    #[arg(long, env = "TITULARES_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub ingest: IngestArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options that only matter when ingesting.
#[derive(Args, Debug, Default)]
pub struct IngestArgs {
    /// MySQL connection URL; enables the database insert
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Skip the database even if a URL is configured
    #[arg(long)]
    pub no_db: bool,

    /// Headlines kept per source
    #[arg(long)]
    pub max_entries: Option<usize>,

    /// Per-source timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Sources fetched at the same time (defaults to available parallelism)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print headline counts per source and top words per scale
    Report {
        /// Words listed per scale
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Read headlines from the database table instead of the CSV export
        #[arg(long)]
        from_db: bool,
    },
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            output_path: self.output.clone(),
            database_url: self.ingest.database_url.clone(),
            no_database: self.ingest.no_db,
            max_entries: self.ingest.max_entries,
            timeout_secs: self.ingest.timeout_secs,
            concurrency: self.ingest.concurrency,
            summary_path: self.ingest.summary.clone(),
        }
    }
}
