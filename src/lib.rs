//! # Titulares
//!
//! Polls a fixed set of news feeds spread over an eight-point editorial
//! scale, keeps the newest headlines of each, and exports them to CSV and,
//! optionally, a MySQL table.
//!
//! ## Architecture
//!
//! 1. **Registry**: [`sources`] and [`config`] produce validated descriptors
//! 2. **Worker**: [`fetch`] retrieves and normalizes one feed
//! 3. **Fan-out**: [`coordinator`] runs the worker for every source concurrently
//! 4. **Sink**: [`outputs`] writes the CSV export and the optional database rows
//!
//! [`pipeline::run_ingest`] wires the stages together; [`analysis`] reads an
//! export back for the console report.

pub mod analysis;
pub mod config;
pub mod coordinator;
pub mod dates;
pub mod error;
pub mod feeds;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod sources;
pub mod utils;

pub use config::{AppConfig, Overrides};
pub use error::{ConfigError, FetchError, SinkError};
pub use models::{HeadlineRecord, RunSummary, Scale, SourceDescriptor};
