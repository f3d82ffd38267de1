//! Error types for each layer of the pipeline.
//!
//! Only [`ConfigError`] and the file half of [`SinkError`] ever stop a run.
//! [`FetchError`] is isolated to a single source and [`SinkError::Database`]
//! is reported and swallowed by the sink.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Problems found while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("scale {0} is outside the 1-8 range")]
    ScaleOutOfRange(i64),

    #[error("source name must not be empty")]
    EmptyName,

    #[error("invalid feed url for {name}: {source}")]
    InvalidUrl {
        name: String,
        #[source]
        source: url::ParseError,
    },

    #[error("feed url for {name} must be http or https, got {scheme}")]
    UnsupportedScheme { name: String, scheme: String },

    #[error("no sources configured")]
    NoSources,

    #[error("max_entries must be at least 1")]
    ZeroEntries,

    #[error("timeout_secs must be at least 1")]
    ZeroTimeout,

    #[error("invalid table name {0:?}")]
    InvalidTable(String),

    #[error(
        "{sources} sources x {max_entries} entries can exceed the {limit} rows one INSERT can carry"
    )]
    InsertTooLarge {
        sources: usize,
        max_entries: usize,
        limit: usize,
    },

    #[error("the database report needs a database url")]
    DatabaseRequired,
}

/// A source could not be retrieved or understood.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("not a feed document (root element <{0}>)")]
    NotAFeed(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Raised by non-HTTP feed clients (fixtures, tests).
    #[error("{0}")]
    Unavailable(String),
}

/// Failures of the persistence sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serializing run summary: {0}")]
    Json(#[from] serde_json::Error),
}
