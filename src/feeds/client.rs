//! Feed document retrieval.

use crate::error::FetchError;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Something that can hand back the raw XML of a feed.
///
/// The pipeline only ever needs the body; status handling, redirects and
/// charset decoding are the implementation's business.
pub trait FeedClient {
    /// Retrieve the feed document at `url`.
    async fn fetch_feed(&self, url: &Url) -> Result<String, FetchError>;
}

impl<T: FeedClient> FeedClient for &T {
    async fn fetch_feed(&self, url: &Url) -> Result<String, FetchError> {
        (**self).fetch_feed(url).await
    }
}

/// [`FeedClient`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    client: reqwest::Client,
}

impl HttpFeedClient {
    /// Build a client. `timeout` bounds each request end to end; the worker
    /// applies its own per-source timeout on top.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl FeedClient for HttpFeedClient {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch_feed(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        debug!(bytes = body.len(), "Downloaded feed");
        Ok(body)
    }
}
