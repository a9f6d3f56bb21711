//! List page extraction
//!
//! Turns one fetched list page into the declared item count and the
//! movie records visible on that page.
//!
//! # Overview
//!
//! Extraction is split in two layers:
//! - [`ListDocument`] - the query capability (summary element, title rows,
//!   anchor in a row), implemented for HTML by [`HtmlDocument`]
//! - [`ListExtractor`] - the pure transform from a document to records
//!
//! Malformed rows are skipped and a missing summary reads as an empty
//! list; extraction never fails.

mod document;
mod extractor;

pub use document::{Anchor, HtmlDocument, ListDocument};
pub use extractor::{extract_imdb_id, ListExtractor, PageExtract};
