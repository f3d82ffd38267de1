//! One ingestion run: fan out, persist, summarize.

use crate::config::AppConfig;
use crate::coordinator::Coordinator;
use crate::error::SinkError;
use crate::feeds::FeedClient;
use crate::models::RunSummary;
use crate::outputs::{Sink, json};
use chrono::Utc;
use tracing::{info, instrument, warn};

/// Run the whole pipeline once with `client`.
///
/// # Errors
///
/// Only when the CSV export cannot be written. Source failures and database
/// failures are part of the returned [`RunSummary`].
#[instrument(level = "info", skip_all, fields(sources = config.sources.len()))]
pub async fn run_ingest<C: FeedClient>(
    config: &AppConfig,
    client: C,
) -> Result<RunSummary, SinkError> {
    let started_at = Utc::now();

    let coordinator = Coordinator::new(client, config.fetch_options(), config.concurrency);
    let reports = coordinator.run(&config.sources).await;

    let sink = Sink::new(config.output_path.clone(), config.database.clone());
    let delivered = sink.persist(&reports).await?;

    let summary = RunSummary::new(
        started_at,
        reports,
        config.output_path.display().to_string(),
        delivered.database,
    );
    info!(
        records = summary.total_records,
        fetched = summary.fetched,
        empty = summary.empty,
        failed = summary.failed,
        path = %summary.csv_path,
        "Run complete"
    );

    if let Some(path) = &config.summary_path {
        if let Err(e) = json::write_summary(&summary, path).await {
            warn!(error = %e, path = %path.display(), "Could not write run summary");
        }
    }

    Ok(summary)
}
