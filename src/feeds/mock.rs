//! Canned feed client for unit tests.

use crate::error::FetchError;
use crate::feeds::FeedClient;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub(crate) enum Canned {
    Body(String),
    Fail(String),
}

#[derive(Debug, Default)]
pub(crate) struct MockFeedClient {
    responses: HashMap<String, (Duration, Canned)>,
}

impl MockFeedClient {
    pub(crate) fn with(mut self, url: &str, delay_ms: u64, canned: Canned) -> Self {
        self.responses
            .insert(url.to_string(), (Duration::from_millis(delay_ms), canned));
        self
    }
}

impl FeedClient for MockFeedClient {
    async fn fetch_feed(&self, url: &Url) -> Result<String, FetchError> {
        let (delay, canned) = self
            .responses
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| FetchError::Unavailable(format!("no route to {url}")))?;
        tokio::time::sleep(delay).await;
        match canned {
            Canned::Body(body) => Ok(body),
            Canned::Fail(message) => Err(FetchError::Unavailable(message)),
        }
    }
}

/// RSS document with `n` items dated on consecutive days of March 2025.
pub(crate) fn rss_with_items(n: usize) -> String {
    let items: String = (1..=n)
        .map(|i| {
            format!(
                "<item><title>Headline {i}</title><link>https://news.example/{i}</link>\
                 <pubDate>2025-03-{:02}T09:00:00Z</pubDate></item>",
                (i % 28) + 1
            )
        })
        .collect();
    format!(r#"<?xml version="1.0"?><rss version="2.0"><channel><title>t</title>{items}</channel></rss>"#)
}
