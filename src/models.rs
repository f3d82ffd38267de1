//! Data models shared by the fetch, persistence and report stages.
//!
//! - [`SourceDescriptor`]: one configured feed and its place on the scale
//! - [`HeadlineRecord`]: one normalized headline taken from a feed entry
//! - [`SourceReport`]: what happened to a single source during a run
//! - [`RunSummary`]: the aggregated outcome of a whole run

use crate::error::ConfigError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Rendering of [`PublishedDate::Unknown`] in the CSV export and the database.
pub const SENTINEL_DATE: &str = "1970-01-01";

/// Position of a source on the editorial scale, always within `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Scale(u8);

impl Scale {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Scale {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Scale(value as u8))
        } else {
            Err(ConfigError::ScaleOutOfRange(value))
        }
    }
}

impl From<Scale> for u8 {
    fn from(scale: Scale) -> u8 {
        scale.0
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A configured feed source.
///
/// Descriptors are built once at startup and never change during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    /// Display name, copied into every record produced from this feed.
    pub name: String,
    /// RSS or Atom document URL.
    pub feed_url: Url,
    /// Editorial position of the source.
    pub scale: Scale,
}

impl SourceDescriptor {
    /// Validate and build a descriptor.
    ///
    /// # Errors
    ///
    /// Fails on an empty name, an unparseable or non-HTTP URL, or a scale
    /// outside `1..=8`.
    pub fn new(name: &str, feed_url: &str, scale: i64) -> Result<Self, ConfigError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        let feed_url = Url::parse(feed_url).map_err(|source| ConfigError::InvalidUrl {
            name: name.to_string(),
            source,
        })?;
        if !matches!(feed_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                name: name.to_string(),
                scheme: feed_url.scheme().to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            feed_url,
            scale: Scale::try_from(scale)?,
        })
    }
}

/// Publication date of a headline after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PublishedDate {
    Known(NaiveDate),
    /// The feed gave no date, or one that could not be parsed.
    Unknown,
}

impl PublishedDate {
    /// Date to store; the sentinel epoch date for [`PublishedDate::Unknown`].
    pub fn as_naive_date(self) -> NaiveDate {
        match self {
            PublishedDate::Known(d) => d,
            PublishedDate::Unknown => NaiveDate::default(),
        }
    }

    /// Read back a date column written by the CSV export.
    pub fn from_export(s: &str) -> Self {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self::from_stored)
            .unwrap_or(PublishedDate::Unknown)
    }

    /// Inverse of [`PublishedDate::as_naive_date`].
    pub fn from_stored(date: NaiveDate) -> Self {
        if date == NaiveDate::default() {
            PublishedDate::Unknown
        } else {
            PublishedDate::Known(date)
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, PublishedDate::Known(_))
    }
}

impl fmt::Display for PublishedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishedDate::Known(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            PublishedDate::Unknown => f.write_str(SENTINEL_DATE),
        }
    }
}

/// One headline taken from a feed entry.
///
/// `source_name` and `scale` always come from the descriptor that produced
/// the record; use [`HeadlineRecord::from_descriptor`] to keep it that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineRecord {
    pub published_date: PublishedDate,
    pub source_name: String,
    pub scale: Scale,
    pub title: String,
    pub link: String,
}

impl HeadlineRecord {
    pub fn from_descriptor(
        descriptor: &SourceDescriptor,
        published_date: PublishedDate,
        title: String,
        link: String,
    ) -> Self {
        Self {
            published_date,
            source_name: descriptor.name.clone(),
            scale: descriptor.scale,
            title,
            link,
        }
    }
}

/// How a single source fared during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    Fetched { count: usize },
    Empty,
    Failed { message: String },
}

/// Result of running the worker for one descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source_name: String,
    pub scale: Scale,
    #[serde(flatten)]
    pub outcome: SourceOutcome,
    pub elapsed_ms: u64,
    /// Headlines in feed order; empty unless the outcome is `Fetched`.
    #[serde(skip)]
    pub records: Vec<HeadlineRecord>,
}

impl SourceReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, SourceOutcome::Failed { .. })
    }
}

/// What happened on the optional database path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DatabaseOutcome {
    /// No database configured, disabled, or nothing to insert.
    Skipped,
    Inserted { rows: u64 },
    Failed { message: String },
}

/// Aggregated outcome of one ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub sources: Vec<SourceReport>,
    pub total_records: usize,
    pub fetched: usize,
    pub empty: usize,
    pub failed: usize,
    pub csv_path: String,
    pub database: DatabaseOutcome,
}

impl RunSummary {
    pub fn new(
        started_at: DateTime<Utc>,
        sources: Vec<SourceReport>,
        csv_path: String,
        database: DatabaseOutcome,
    ) -> Self {
        let mut fetched = 0;
        let mut empty = 0;
        let mut failed = 0;
        for report in &sources {
            match report.outcome {
                SourceOutcome::Fetched { .. } => fetched += 1,
                SourceOutcome::Empty => empty += 1,
                SourceOutcome::Failed { .. } => failed += 1,
            }
        }
        let total_records = sources.iter().map(|r| r.records.len()).sum();
        Self {
            started_at,
            finished_at: Utc::now(),
            sources,
            total_records,
            fetched,
            empty,
            failed,
            csv_path,
            database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_accepts_only_one_through_eight() {
        assert!(Scale::try_from(0).is_err());
        assert_eq!(Scale::try_from(1).unwrap().get(), 1);
        assert_eq!(Scale::try_from(8).unwrap().get(), 8);
        assert!(matches!(
            Scale::try_from(9),
            Err(ConfigError::ScaleOutOfRange(9))
        ));
        assert!(Scale::try_from(-3).is_err());
    }

    #[test]
    fn descriptor_rejects_bad_input() {
        assert!(matches!(
            SourceDescriptor::new("  ", "https://example.com/rss", 3),
            Err(ConfigError::EmptyName)
        ));
        assert!(matches!(
            SourceDescriptor::new("X", "not a url", 3),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            SourceDescriptor::new("X", "ftp://example.com/rss", 3),
            Err(ConfigError::UnsupportedScheme { .. })
        ));
        let d = SourceDescriptor::new(" BBC News ", "http://feeds.bbci.co.uk/news/world/rss.xml", 6)
            .unwrap();
        assert_eq!(d.name, "BBC News");
        assert_eq!(d.scale.get(), 6);
    }

    #[test]
    fn record_copies_name_and_scale_from_descriptor() {
        let d = SourceDescriptor::new("RT", "https://www.rt.com/rss/", 1).unwrap();
        let r = HeadlineRecord::from_descriptor(
            &d,
            PublishedDate::Unknown,
            "t".to_string(),
            "l".to_string(),
        );
        assert_eq!(r.source_name, "RT");
        assert_eq!(r.scale, d.scale);
    }

    #[test]
    fn unknown_date_renders_as_sentinel() {
        assert_eq!(PublishedDate::Unknown.to_string(), SENTINEL_DATE);
        assert_eq!(
            PublishedDate::Unknown.as_naive_date(),
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
        );
        let d = PublishedDate::Known(NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        assert_eq!(d.to_string(), "2025-03-03");
    }

    #[test]
    fn export_dates_read_back() {
        assert_eq!(PublishedDate::from_export(SENTINEL_DATE), PublishedDate::Unknown);
        assert_eq!(PublishedDate::from_export("garbage"), PublishedDate::Unknown);
        assert!(PublishedDate::from_export("2025-03-03").is_known());
    }

    #[test]
    fn summary_counts_outcomes() {
        let scale = Scale::try_from(2).unwrap();
        let report = |outcome, n: usize| SourceReport {
            source_name: "s".into(),
            scale,
            outcome,
            elapsed_ms: 0,
            records: (0..n)
                .map(|i| HeadlineRecord {
                    published_date: PublishedDate::Unknown,
                    source_name: "s".into(),
                    scale,
                    title: format!("t{i}"),
                    link: String::new(),
                })
                .collect(),
        };
        let summary = RunSummary::new(
            Utc::now(),
            vec![
                report(SourceOutcome::Fetched { count: 3 }, 3),
                report(SourceOutcome::Empty, 0),
                report(
                    SourceOutcome::Failed {
                        message: "boom".into(),
                    },
                    0,
                ),
            ],
            "out.csv".into(),
            DatabaseOutcome::Skipped,
        );
        assert_eq!(summary.total_records, 3);
        assert_eq!((summary.fetched, summary.empty, summary.failed), (1, 1, 1));

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains(r#""status":"failed""#));
        assert!(json.contains(r#""message":"boom""#));
        assert!(!json.contains(r#""records""#));
    }
}
