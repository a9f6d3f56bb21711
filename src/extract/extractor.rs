//! Records and total count from a list document

use super::document::{HtmlDocument, ListDocument};
use crate::types::MovieRecord;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// IMDb title or name id, e.g. `tt0078748`
static IMDB_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:nm|tt)\d{7,8}").unwrap());

/// Find the first IMDb id embedded in a URL
pub fn extract_imdb_id(url: &str) -> Option<&str> {
    IMDB_ID_REGEX.find(url).map(|m| m.as_str())
}

/// What one page yields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtract {
    /// Declared list size, 0 when the summary is missing or unreadable
    pub total_count: u64,
    /// Records in row order
    pub records: Vec<MovieRecord>,
}

/// Pure transform from a list page to movie records
#[derive(Debug, Clone)]
pub struct ListExtractor {
    site: String,
}

impl ListExtractor {
    /// Create an extractor that resolves row links against `site`
    pub fn new(site: impl Into<String>) -> Self {
        Self {
            site: site.into().trim_end_matches('/').to_string(),
        }
    }

    /// Site root links are resolved against
    pub fn site(&self) -> &str {
        &self.site
    }

    /// Total count and records of a document
    pub fn extract<D: ListDocument>(&self, doc: &D) -> PageExtract {
        PageExtract {
            total_count: self.total_count(doc),
            records: self.records(doc),
        }
    }

    /// Parse an HTML body and extract it
    pub fn extract_html(&self, body: &str) -> PageExtract {
        self.extract(&HtmlDocument::parse(body))
    }

    /// Parse an HTML body and return only its records
    pub fn records_html(&self, body: &str) -> Vec<MovieRecord> {
        self.records(&HtmlDocument::parse(body))
    }

    /// Declared list size from the summary element
    pub fn total_count<D: ListDocument>(&self, doc: &D) -> u64 {
        let Some(raw) = doc.summary_size() else {
            debug!("No list summary element found, treating list as empty");
            return 0;
        };

        match raw.trim().parse::<u64>() {
            Ok(count) => count,
            Err(e) => {
                warn!("Unreadable list size '{}': {}, treating list as empty", raw, e);
                0
            }
        }
    }

    /// Records from every well-formed row.
    ///
    /// Rows without an anchor or without an `href` are skipped. A link with
    /// no recognizable id still yields a record, with an empty id.
    pub fn records<D: ListDocument>(&self, doc: &D) -> Vec<MovieRecord> {
        let rows = doc.rows();
        let mut records = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let Some(anchor) = doc.anchor_in(row) else {
                debug!("Skipping row {}: no link", index + 1);
                continue;
            };
            let Some(href) = anchor.href else {
                debug!("Skipping row {}: link has no href", index + 1);
                continue;
            };

            let canonical_url = format!("{}{}", self.site, href)
                .trim_end_matches('/')
                .to_string();
            let external_id = extract_imdb_id(&canonical_url)
                .unwrap_or_default()
                .to_string();
            if external_id.is_empty() {
                debug!("No imdb id in {}", canonical_url);
            }

            records.push(MovieRecord {
                title: anchor.text.clone(),
                canonical_url,
                external_id,
                display_name: anchor.text,
            });
        }

        records
    }
}
