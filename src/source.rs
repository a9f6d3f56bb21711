//! Cached list source
//!
//! Wires the pieces together: a [`ResultCache`] in front of a
//! [`ListRetriever`], with time taken from an injected [`Clock`].

use crate::cache::{CacheStore, Clock, FileStore, MemoryStore, ResultCache, SystemClock};
use crate::config::SourceConfig;
use crate::error::Result;
use crate::http::{HttpClient, PageFetcher};
use crate::pagination::ListRetriever;
use crate::types::{ListConfig, MovieRecord};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Retrieves lists, serving repeated requests from cache
#[derive(Debug)]
pub struct ListSource<F, S, C> {
    retriever: ListRetriever<F>,
    cache: ResultCache<S>,
    clock: C,
}

impl<F, S, C> ListSource<F, S, C>
where
    F: PageFetcher,
    S: CacheStore,
    C: Clock,
{
    /// Assemble a source from its parts
    pub fn new(retriever: ListRetriever<F>, cache: ResultCache<S>, clock: C) -> Self {
        Self {
            retriever,
            cache,
            clock,
        }
    }

    /// The retriever behind the cache
    pub fn retriever(&self) -> &ListRetriever<F> {
        &self.retriever
    }

    /// The result cache
    pub fn cache(&self) -> &ResultCache<S> {
        &self.cache
    }

    /// Records of a list, from cache when fresh
    pub async fn records(&self, config: &ListConfig) -> Result<Vec<MovieRecord>> {
        self.records_with_cancel(config, &CancellationToken::new())
            .await
    }

    /// Records of a list, cancellable at page boundaries.
    ///
    /// A cancelled retrieval writes nothing to the cache.
    pub async fn records_with_cancel(
        &self,
        config: &ListConfig,
        cancel: &CancellationToken,
    ) -> Result<Vec<MovieRecord>> {
        let now = self.clock.now();
        self.cache
            .get_or_fetch(config, now, || {
                self.retriever.retrieve_with_cancel(config, cancel)
            })
            .await
    }
}

/// Source over HTTP with a store picked from config
pub type HttpListSource = ListSource<HttpClient, Arc<dyn CacheStore>, SystemClock>;

impl HttpListSource {
    /// Build the production source: reqwest fetcher, file or memory store, wall clock
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        config.validate()?;
        let ttl = config.cache_ttl()?;
        let client = HttpClient::with_config(config.http_client_config())?;
        let store: Arc<dyn CacheStore> = match &config.cache_file {
            Some(path) => Arc::new(FileStore::open(path)?),
            None => Arc::new(MemoryStore::new()),
        };

        Ok(Self::new(
            ListRetriever::new(client, config.site()),
            ResultCache::with_ttl(store, ttl),
            SystemClock,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::error::Error;
    use crate::http::FetchedPage;
    use crate::test_support::{list_page, title_rows, StaticFetcher};
    use chrono::{Duration, TimeZone, Utc};

    const SITE: &str = "http://www.imdb.com";
    const RATINGS_URL: &str = "http://www.imdb.com/user/ur1234567/ratings?view=compact";

    fn ratings() -> ListConfig {
        ListConfig::new("ur1234567", "ratings")
    }

    fn source(
        fetcher: StaticFetcher,
    ) -> ListSource<StaticFetcher, MemoryStore, Arc<ManualClock>> {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ));
        ListSource::new(
            ListRetriever::new(fetcher, SITE),
            ResultCache::new(MemoryStore::new()),
            clock,
        )
    }

    #[tokio::test]
    async fn test_second_call_within_ttl_is_cached() {
        let fetcher = StaticFetcher::new().page(
            RATINGS_URL,
            FetchedPage::ok(list_page(Some(2), &title_rows(1, 2))),
        );
        let source = source(fetcher);

        let first = source.records(&ratings()).await.unwrap();
        source.clock.advance(Duration::minutes(119));
        let second = source.records(&ratings()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.retriever().fetcher().requests().len(), 1);

        source.clock.advance(Duration::minutes(1));
        source.records(&ratings()).await.unwrap();
        assert_eq!(source.retriever().fetcher().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_access_error_leaves_cache_empty() {
        let source = source(StaticFetcher::new());

        let err = source.records(&ratings()).await.unwrap_err();

        assert!(matches!(err, Error::Access { .. }));
        assert!(source.cache().store().is_empty().await);
    }

    #[tokio::test]
    async fn test_later_page_failure_leaves_cache_empty() {
        let fetcher = StaticFetcher::new()
            .page(
                RATINGS_URL,
                FetchedPage::ok(list_page(Some(300), &title_rows(1, 250))),
            )
            .page(format!("{RATINGS_URL}&start=251"), FetchedPage::new(503, ""));
        let source = source(fetcher);

        let err = source.records(&ratings()).await.unwrap_err();

        assert_eq!(err.page(), Some(2));
        assert!(source.cache().store().is_empty().await);
    }

    #[tokio::test]
    async fn test_cancelled_retrieval_is_not_cached() {
        let fetcher = StaticFetcher::new().page(
            RATINGS_URL,
            FetchedPage::ok(list_page(Some(1), &title_rows(1, 1))),
        );
        let source = source(fetcher);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = source
            .records_with_cancel(&ratings(), &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Cancelled { .. }));
        assert!(source.cache().store().is_empty().await);
    }

    #[test]
    fn test_from_config_rejects_unbounded_ttl() {
        let config = SourceConfig {
            cache_ttl_minutes: 1 << 62,
            ..SourceConfig::default()
        };
        let err = HttpListSource::from_config(&config)
            .err()
            .expect("expected from_config to fail");
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_from_config_memory_store() {
        let source = HttpListSource::from_config(&SourceConfig::default()).unwrap();
        assert_eq!(source.cache().ttl(), Duration::hours(2));
        assert_eq!(
            source.retriever().list_url(&ratings()),
            RATINGS_URL.to_string()
        );
    }
}
