//! Shared fixtures for unit tests

use crate::error::{Error, Result};
use crate::http::{FetchedPage, PageFetcher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Fetcher serving canned pages and recording every requested URL.
/// Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, FetchedPage>,
    broken: Vec<String>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: impl Into<String>, page: FetchedPage) -> Self {
        self.pages.insert(url.into(), page);
        self
    }

    /// Fail `url` at the transport level
    pub fn broken(mut self, url: impl Into<String>) -> Self {
        self.broken.push(url.into());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        self.requests.lock().unwrap().push(url.to_string());
        if self.broken.iter().any(|u| u == url) {
            return Err(Error::Timeout { timeout_ms: 30000 });
        }
        Ok(self
            .pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| FetchedPage::new(404, "")))
    }
}

/// Compact list page with an optional summary and one row per `(href, title)`
pub fn list_page(size: Option<u64>, rows: &[(String, String)]) -> String {
    let summary = size
        .map(|size| format!(r#"<div class="desc" data-size="{size}"></div>"#))
        .unwrap_or_default();
    let rows: String = rows
        .iter()
        .map(|(href, title)| {
            format!(r#"<tr><td class="title"><a href="{href}">{title}</a></td></tr>"#)
        })
        .collect();
    format!("<html><body>{summary}<table>{rows}</table></body></html>")
}

/// `count` rows with ids `tt{first..}` zero-padded to seven digits
pub fn title_rows(first: u64, count: u64) -> Vec<(String, String)> {
    (first..first + count)
        .map(|n| (format!("/title/tt{n:07}/"), format!("Movie {n}")))
        .collect()
}
