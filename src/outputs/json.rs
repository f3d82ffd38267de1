//! JSON export of the run summary.
//!
//! The summary lists every source with its status (`fetched`, `empty`,
//! `failed` plus message) and the database outcome, so a scheduler or a human
//! can see what a run delivered without grepping the log.

use crate::error::SinkError;
use crate::models::RunSummary;
use crate::utils::ensure_parent_dir;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write `summary` as pretty-printed JSON to `path`.
///
/// # Arguments
///
/// * `summary` - The finished run
/// * `path` - Destination file; missing parent directories are created
///
/// # Returns
///
/// `Ok(())` on success, or an error if serialization, directory creation or
/// the write fails. The pipeline only logs such an error.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_summary(summary: &RunSummary, path: &Path) -> Result<(), SinkError> {
    let json = serde_json::to_string_pretty(summary)?;
    let io_err = |source| SinkError::Io {
        path: path.to_path_buf(),
        source,
    };
    ensure_parent_dir(path).await.map_err(io_err)?;
    fs::write(path, json).await.map_err(io_err)?;
    info!("Wrote run summary");
    Ok(())
}
