//! CSV export of a run's headlines.
//!
//! The file is rewritten from scratch on every run and always starts with
//! the header row, even when no source returned anything.

use crate::error::SinkError;
use crate::models::{HeadlineRecord, PublishedDate, Scale};
use crate::utils::ensure_parent_dir;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Column names of the export, in order.
pub const HEADER: [&str; 5] = ["Fecha", "Fuente", "Escala", "Titular", "Enlace"];

/// Render the header plus one row per record.
///
/// Unknown dates are written as the sentinel date, so every row has a valid
/// ISO date in the first column.
pub fn render_csv<'a, I>(records: I) -> Result<Vec<u8>, SinkError>
where
    I: IntoIterator<Item = &'a HeadlineRecord>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for record in records {
        let date = record.published_date.to_string();
        let scale = record.scale.to_string();
        writer.write_record([
            date.as_str(),
            record.source_name.as_str(),
            scale.as_str(),
            record.title.as_str(),
            record.link.as_str(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| SinkError::Csv(csv::Error::from(e.into_error())))
}

/// Write the export to `path`, replacing any previous file.
///
/// # Arguments
///
/// * `path` - Destination file; missing parent directories are created
/// * `records` - Records in source order, then entry order
///
/// # Returns
///
/// The number of data rows written. The header is always written, so an
/// empty `records` still produces a one-line file.
///
/// # Errors
///
/// [`SinkError::Io`] or [`SinkError::Csv`]; either one fails the run.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_csv(path: &Path, records: &[&HeadlineRecord]) -> Result<usize, SinkError> {
    let bytes = render_csv(records.iter().copied())?;
    let io_err = |source| SinkError::Io {
        path: path.to_path_buf(),
        source,
    };
    ensure_parent_dir(path).await.map_err(io_err)?;
    fs::write(path, bytes).await.map_err(io_err)?;
    info!(rows = records.len(), "Headlines saved");
    Ok(records.len())
}

#[derive(Debug, Deserialize)]
struct ExportRow {
    #[serde(rename = "Fecha")]
    date: String,
    #[serde(rename = "Fuente")]
    source: String,
    #[serde(rename = "Escala")]
    scale: i64,
    #[serde(rename = "Titular")]
    title: String,
    #[serde(rename = "Enlace")]
    link: String,
}

/// Load a previously written export.
///
/// Rows with a scale outside `1..=8` are skipped with a warning.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn read_csv(path: &Path) -> Result<Vec<HeadlineRecord>, SinkError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<ExportRow>().enumerate() {
        let row = row?;
        let scale = match Scale::try_from(row.scale) {
            Ok(scale) => scale,
            Err(e) => {
                warn!(row = index + 1, error = %e, "Skipping row");
                continue;
            }
        };
        records.push(HeadlineRecord {
            published_date: PublishedDate::from_export(&row.date),
            source_name: row.source,
            scale,
            title: row.title,
            link: row.link,
        });
    }
    info!(rows = records.len(), "Loaded export");
    Ok(records)
}
