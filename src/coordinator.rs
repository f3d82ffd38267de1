//! Fan-out of the per-source worker.
//!
//! All sources are polled concurrently on the current task with
//! `futures::stream::buffered`, which caps the number of in-flight fetches
//! and yields results in input order no matter which feed answers first.

use crate::feeds::FeedClient;
use crate::fetch::{FetchOptions, fetch_source};
use crate::models::{SourceDescriptor, SourceReport};
use futures::stream::{self, StreamExt};
use std::num::NonZeroUsize;
use tracing::{info, instrument};

/// Pool size used when none is configured: the host's available parallelism.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(4)
}

/// Dispatches one worker call per descriptor.
#[derive(Debug)]
pub struct Coordinator<C> {
    client: C,
    options: FetchOptions,
    concurrency: usize,
}

impl<C: FeedClient> Coordinator<C> {
    pub fn new(client: C, options: FetchOptions, concurrency: usize) -> Self {
        Self {
            client,
            options,
            concurrency: concurrency.max(1),
        }
    }

    /// Fetch every descriptor. `result[i]` always belongs to `descriptors[i]`.
    ///
    /// At most `concurrency` sources are in flight at once. A failing or
    /// slow source only affects its own report.
    #[instrument(level = "info", skip_all, fields(sources = descriptors.len(), concurrency = self.concurrency))]
    pub async fn run(&self, descriptors: &[SourceDescriptor]) -> Vec<SourceReport> {
        let reports: Vec<SourceReport> = stream::iter(descriptors)
            .map(|descriptor| fetch_source(&self.client, descriptor, &self.options))
            .buffered(self.concurrency)
            .collect()
            .await;

        let records: usize = reports.iter().map(|r| r.records.len()).sum();
        let failed = reports.iter().filter(|r| r.is_failed()).count();
        info!(records, failed, "All sources processed");
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::mock::{Canned, MockFeedClient, rss_with_items};
    use crate::models::SourceOutcome;

    #[tokio::test]
    async fn preserves_descriptor_order_under_staggered_latency() {
        let descriptors: Vec<SourceDescriptor> = (1..=5)
            .map(|i| {
                SourceDescriptor::new(
                    &format!("Source {i}"),
                    &format!("https://feeds.example/{i}"),
                    i,
                )
                .unwrap()
            })
            .collect();
        // Earlier sources answer last.
        let client = (1..=5).fold(MockFeedClient::default(), |c, i| {
            c.with(
                &format!("https://feeds.example/{i}"),
                (6 - i as u64) * 40,
                Canned::Body(rss_with_items(i as usize)),
            )
        });

        let coordinator = Coordinator::new(client, FetchOptions::default(), 5);
        let reports = coordinator.run(&descriptors).await;

        let names: Vec<&str> = reports.iter().map(|r| r.source_name.as_str()).collect();
        assert_eq!(
            names,
            ["Source 1", "Source 2", "Source 3", "Source 4", "Source 5"]
        );
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.records.len(), i + 1);
            assert_eq!(report.scale, descriptors[i].scale);
        }
    }

    #[tokio::test]
    async fn one_failure_does_not_affect_the_rest() {
        let descriptors = vec![
            SourceDescriptor::new("A", "https://feeds.example/a", 1).unwrap(),
            SourceDescriptor::new("B", "https://feeds.example/b", 2).unwrap(),
            SourceDescriptor::new("C", "https://feeds.example/c", 3).unwrap(),
        ];
        let client = MockFeedClient::default()
            .with("https://feeds.example/a", 10, Canned::Body(rss_with_items(2)))
            .with("https://feeds.example/b", 0, Canned::Fail("dns failure".into()))
            .with("https://feeds.example/c", 5, Canned::Body(rss_with_items(4)));

        let reports = Coordinator::new(&client, FetchOptions::default(), 1)
            .run(&descriptors)
            .await;

        assert_eq!(reports[0].outcome, SourceOutcome::Fetched { count: 2 });
        assert!(reports[1].is_failed());
        assert_eq!(reports[2].outcome, SourceOutcome::Fetched { count: 4 });
    }

    #[test]
    fn concurrency_is_at_least_one() {
        assert!(default_concurrency() >= 1);
        let c = Coordinator::new(MockFeedClient::default(), FetchOptions::default(), 0);
        assert_eq!(c.concurrency, 1);
    }
}
