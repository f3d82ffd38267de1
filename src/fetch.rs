//! Per-source fetch and normalization.
//!
//! [`fetch_source`] never fails: anything that goes wrong while retrieving or
//! parsing a feed is logged once, turned into [`SourceOutcome::Failed`], and
//! the source contributes no records to the run.

use crate::dates::normalize_date;
use crate::error::FetchError;
use crate::feeds::{FeedClient, RawEntry, parse_feed};
use crate::models::{HeadlineRecord, SourceDescriptor, SourceOutcome, SourceReport};
use crate::utils::truncate_for_log;
use itertools::Itertools;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{error, info, instrument, warn};

/// Stored when an entry has no usable title.
pub const NO_TITLE: &str = "Sin título";
/// Stored when an entry has no link.
pub const NO_LINK: &str = "Sin enlace";

/// Per-source limits.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// How many entries to keep from the top of each feed.
    pub max_entries: usize,
    /// Upper bound on retrieving one feed.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_entries: 10,
            timeout: Duration::from_secs(20),
        }
    }
}

/// Fetch one source and normalize its newest entries.
///
/// The whole retrieval is bounded by `options.timeout`. Every outcome is
/// logged exactly once: `info` on success, `warn` for an empty feed and
/// `error` (with the source name) for any failure.
///
/// # Arguments
///
/// * `client` - Feed client used for the retrieval
/// * `descriptor` - The source to poll
/// * `options` - Entry limit and timeout
///
/// # Returns
///
/// A [`SourceReport`] that is `Fetched` with at most `options.max_entries`
/// records, `Empty`, or `Failed` with the error message. This function never
/// returns an error; failures stay inside the report.
#[instrument(level = "info", skip_all, fields(source = %descriptor.name))]
pub async fn fetch_source<C: FeedClient>(
    client: &C,
    descriptor: &SourceDescriptor,
    options: &FetchOptions,
) -> SourceReport {
    let t0 = Instant::now();
    info!(url = %descriptor.feed_url, scale = %descriptor.scale, "Scraping source");

    let result = match timeout(options.timeout, client.fetch_feed(&descriptor.feed_url)).await {
        Ok(body) => body.and_then(|xml| parse_feed(&xml)),
        Err(_) => Err(FetchError::Timeout(options.timeout)),
    };
    let elapsed_ms = t0.elapsed().as_millis() as u64;

    let (outcome, records) = match result {
        Ok(entries) if entries.is_empty() => {
            warn!(source = %descriptor.name, elapsed_ms, "No entries found in feed");
            (SourceOutcome::Empty, Vec::new())
        }
        Ok(entries) => {
            let available = entries.len();
            let records = to_records(descriptor, entries, options.max_entries);
            info!(
                count = records.len(),
                available,
                elapsed_ms,
                "Fetched headlines"
            );
            (
                SourceOutcome::Fetched {
                    count: records.len(),
                },
                records,
            )
        }
        Err(e) => {
            let message = truncate_for_log(&e.to_string(), 300);
            error!(source = %descriptor.name, error = %message, elapsed_ms, "Error processing source");
            (SourceOutcome::Failed { message }, Vec::new())
        }
    };

    SourceReport {
        source_name: descriptor.name.clone(),
        scale: descriptor.scale,
        outcome,
        elapsed_ms,
        records,
    }
}

/// Turn the first `max_entries` raw entries into records for `descriptor`.
///
/// Titles get their whitespace collapsed. A missing or blank title becomes
/// [`NO_TITLE`], a missing link [`NO_LINK`], and dates go through
/// [`normalize_date`].
///
/// # Examples
///
/// ```
/// use titulares::feeds::RawEntry;
/// use titulares::fetch::{NO_LINK, to_records};
/// use titulares::models::SourceDescriptor;
///
/// let bbc = SourceDescriptor::new("BBC News", "http://feeds.bbci.co.uk/news/world/rss.xml", 6)?;
/// let entries = vec![RawEntry {
///     title: Some("  Talks \n resume ".into()),
///     link: None,
///     published: None,
/// }];
/// let records = to_records(&bbc, entries, 10);
/// assert_eq!(records[0].title, "Talks resume");
/// assert_eq!(records[0].link, NO_LINK);
/// assert_eq!(records[0].scale.get(), 6);
/// # Ok::<(), titulares::ConfigError>(())
/// ```
pub fn to_records(
    descriptor: &SourceDescriptor,
    entries: Vec<RawEntry>,
    max_entries: usize,
) -> Vec<HeadlineRecord> {
    entries
        .into_iter()
        .take(max_entries)
        .map(|entry| {
            let title = entry
                .title
                .map(|t| t.split_whitespace().join(" "))
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| NO_TITLE.to_string());
            let link = entry
                .link
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| NO_LINK.to_string());
            let published_date = normalize_date(entry.published.as_deref().unwrap_or_default());
            HeadlineRecord::from_descriptor(descriptor, published_date, title, link)
        })
        .collect()
}
