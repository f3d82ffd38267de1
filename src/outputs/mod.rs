//! Persistence of a run's output.
//!
//! - [`export`]: the CSV file, the canonical artifact of every run
//! - [`database`]: optional best-effort MySQL bulk insert
//! - [`json`]: optional run summary
//!
//! The CSV write and the database insert are independent: there is no
//! transaction spanning both, and a database failure never touches the file.

pub mod database;
pub mod export;
pub mod json;

use crate::error::SinkError;
use crate::models::{DatabaseOutcome, HeadlineRecord, SourceReport};
use database::DatabaseConfig;
use std::path::PathBuf;
use tracing::{error, info, instrument};

/// What the sink delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkReport {
    pub csv_rows: usize,
    pub database: DatabaseOutcome,
}

/// Writes flattened records to the CSV export and, if configured, MySQL.
#[derive(Debug, Clone)]
pub struct Sink {
    csv_path: PathBuf,
    database: Option<DatabaseConfig>,
}

impl Sink {
    pub fn new(csv_path: PathBuf, database: Option<DatabaseConfig>) -> Self {
        Self { csv_path, database }
    }

    pub fn csv_path(&self) -> &std::path::Path {
        &self.csv_path
    }

    /// Persist all records, in source order then entry order.
    ///
    /// # Errors
    ///
    /// Only a failure to write the CSV file is returned. Database problems
    /// are logged and reported as [`DatabaseOutcome::Failed`].
    #[instrument(level = "info", skip_all, fields(sources = reports.len()))]
    pub async fn persist(&self, reports: &[SourceReport]) -> Result<SinkReport, SinkError> {
        let records: Vec<&HeadlineRecord> =
            reports.iter().flat_map(|r| r.records.iter()).collect();

        let csv_rows = export::write_csv(&self.csv_path, &records).await?;

        let database = match &self.database {
            None => DatabaseOutcome::Skipped,
            Some(_) if records.is_empty() => {
                info!("No headlines to insert; skipping database");
                DatabaseOutcome::Skipped
            }
            Some(config) => match database::insert_records(config, &records).await {
                Ok(rows) => DatabaseOutcome::Inserted { rows },
                Err(e) => {
                    error!(error = %e, table = %config.table, "Database insert failed; CSV export is unaffected");
                    DatabaseOutcome::Failed {
                        message: e.to_string(),
                    }
                }
            },
        };

        Ok(SinkReport { csv_rows, database })
    }
}
