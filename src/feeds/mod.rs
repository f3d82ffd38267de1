//! Feed retrieval and parsing.
//!
//! - [`client`]: the [`FeedClient`] seam and its HTTP implementation
//! - [`parser`]: RSS/Atom entry extraction with `quick-xml`
//!
//! Retrieval and parsing are kept apart so the worker can put a single
//! timeout around the network call and tests can serve canned documents.

pub mod client;
pub mod parser;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{FeedClient, HttpFeedClient};
pub use parser::{RawEntry, parse_feed};
