//! Document query capability
//!
//! The extractor never walks the DOM itself; it asks a [`ListDocument`]
//! for the three things it needs.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Element carrying the total list size in its `data-size` attribute
static SUMMARY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.desc").unwrap());

/// One listing row per movie
static ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td.title").unwrap());

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Link found inside a listing row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Raw `href` attribute, if present
    pub href: Option<String>,
    /// Visible text, untouched
    pub text: String,
}

/// Query interface over one list page
pub trait ListDocument {
    /// Handle to a single listing row
    type Row<'a>
    where
        Self: 'a;

    /// Raw size attribute of the summary element, `None` if the element is absent
    fn summary_size(&self) -> Option<&str>;

    /// All listing rows, in document order
    fn rows(&self) -> Vec<Self::Row<'_>>;

    /// First anchor nested in a row
    fn anchor_in<'a>(&'a self, row: &Self::Row<'a>) -> Option<Anchor>;
}

/// HTML list page parsed with `scraper`
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full HTML document
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }
}

impl ListDocument for HtmlDocument {
    type Row<'a> = ElementRef<'a>;

    fn summary_size(&self) -> Option<&str> {
        self.html
            .select(&SUMMARY_SELECTOR)
            .next()
            .map(|div| div.value().attr("data-size").unwrap_or_default())
    }

    fn rows(&self) -> Vec<ElementRef<'_>> {
        self.html.select(&ROW_SELECTOR).collect()
    }

    fn anchor_in<'a>(&'a self, row: &ElementRef<'a>) -> Option<Anchor> {
        let a = row.select(&ANCHOR_SELECTOR).next()?;
        Some(Anchor {
            href: a.value().attr("href").map(ToString::to_string),
            text: a.text().collect(),
        })
    }
}

impl std::fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDocument").finish_non_exhaustive()
    }
}
