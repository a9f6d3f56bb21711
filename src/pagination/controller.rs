//! List retrieval across pages

use super::types::{list_url, PagePlan};
use crate::error::{Error, Result};
use crate::extract::ListExtractor;
use crate::http::PageFetcher;
use crate::types::{ListConfig, MovieRecord};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Reason reported when the first page cannot be fetched
const ACCESS_REASON: &str = "list is private or does not exist";

/// Outcome of fetching and extracting page 1
#[derive(Debug, Clone)]
pub struct FirstPage {
    /// URL of page 1, which follow-up page URLs extend
    pub base_url: String,
    /// Declared list size
    pub total_count: u64,
    /// Records on page 1
    pub records: Vec<MovieRecord>,
}

impl FirstPage {
    /// Follow-up pages implied by the declared total
    pub fn plan(&self) -> PagePlan {
        PagePlan::new(&self.base_url, self.total_count)
    }
}

/// Fetches every page of a list and collects its records
#[derive(Debug)]
pub struct ListRetriever<F> {
    fetcher: F,
    extractor: ListExtractor,
}

impl<F: PageFetcher> ListRetriever<F> {
    /// Create a retriever for lists hosted under `site`
    pub fn new(fetcher: F, site: impl Into<String>) -> Self {
        Self {
            fetcher,
            extractor: ListExtractor::new(site),
        }
    }

    /// The underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// URL of page 1 for a list
    pub fn list_url(&self, config: &ListConfig) -> String {
        list_url(self.extractor.site(), config)
    }

    /// Retrieve all records of a list
    pub async fn retrieve(&self, config: &ListConfig) -> Result<Vec<MovieRecord>> {
        self.retrieve_with_cancel(config, &CancellationToken::new())
            .await
    }

    /// Retrieve all records, checking `cancel` before every page.
    ///
    /// Records are returned in page order, then row order. Nothing is
    /// returned unless every page was fetched.
    pub async fn retrieve_with_cancel(
        &self,
        config: &ListConfig,
        cancel: &CancellationToken,
    ) -> Result<Vec<MovieRecord>> {
        info!("Retrieving list {} ...", config.list);

        if cancel.is_cancelled() {
            return Err(Error::Cancelled { page: 1 });
        }

        let first = self.first_page(config).await?;
        if first.total_count == 0 {
            info!("No movies were found in imdb list {}", config.list);
            return Ok(Vec::new());
        }

        let plan = first.plan();
        let mut records = first.records;
        records.extend(self.remaining_pages(&plan, cancel).await?);

        info!(
            "Retrieved {} of {} declared movies from list {} ({} pages)",
            records.len(),
            first.total_count,
            config.list,
            plan.len() + 1
        );
        Ok(records)
    }

    /// Phase 1: fetch page 1 and read the declared total
    pub async fn first_page(&self, config: &ListConfig) -> Result<FirstPage> {
        let base_url = self.list_url(config);
        debug!("Requesting {}", base_url);

        let page = self
            .fetcher
            .fetch(&base_url)
            .await
            .map_err(|e| Error::Access {
                page: 1,
                reason: e.to_string(),
            })?;
        if !page.is_success() {
            debug!("Page 1 of {} returned HTTP {}", base_url, page.status);
            return Err(Error::access(ACCESS_REASON));
        }

        let extract = self.extractor.extract_html(&page.body);
        Ok(FirstPage {
            base_url,
            total_count: extract.total_count,
            records: extract.records,
        })
    }

    /// Phase 2: fetch every planned page in order.
    ///
    /// Summary values on these pages are ignored.
    pub async fn remaining_pages(
        &self,
        plan: &PagePlan,
        cancel: &CancellationToken,
    ) -> Result<Vec<MovieRecord>> {
        let mut records = Vec::new();

        for request in plan {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled { page: request.page });
            }

            debug!("Requesting page: {} of imdb list", request.page);
            let page = self
                .fetcher
                .fetch(&request.url)
                .await
                .map_err(|e| Error::page_fetch(request.page, e.to_string()))?;
            if !page.is_success() {
                return Err(Error::page_fetch(
                    request.page,
                    format!("HTTP {}", page.status),
                ));
            }

            records.extend(self.extractor.records_html(&page.body));
        }

        Ok(records)
    }
}
