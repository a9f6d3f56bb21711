//! Page fetcher seam
//!
//! The retrieval core only needs "give me the status and body of this URL".
//! Everything about connections, retries and timeouts lives behind this trait.

use crate::error::Result;
use async_trait::async_trait;

/// Status and body of one fetched document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Final HTTP status code
    pub status: u16,
    /// Response body as text (may be empty on failure statuses)
    pub body: String,
}

impl FetchedPage {
    /// Create a fetched page
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A `200 OK` page
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Only `200` counts as success
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Fetches a URL and reports the final status without judging it.
///
/// Transport-level failures (connection refused, timeout after retries)
/// are returned as `Err`; any HTTP response, including 4xx/5xx, is `Ok`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a single document
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for std::sync::Arc<F> {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        (**self).fetch(url).await
    }
}
