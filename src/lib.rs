//! # imdb-list
//!
//! Retrieves a user's IMDb watchlist, ratings, check-ins or a public list
//! and turns it into [`MovieRecord`]s, one per listed movie.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use imdb_list::{HttpListSource, ListConfig, SourceConfig};
//!
//! #[tokio::main]
//! async fn main() -> imdb_list::Result<()> {
//!     let source = HttpListSource::from_config(&SourceConfig::default())?;
//!
//!     let list = ListConfig::new("ur12345678", "watchlist");
//!     list.validate()?;
//!
//!     for movie in source.records(&list).await? {
//!         println!("{} {}", movie.external_id, movie.title);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ListConfig ──► ResultCache ──hit──► records
//!                    │ miss
//!                    ▼
//!              ListRetriever ──► PageFetcher (page 1, then start=251, 501, ...)
//!                    │
//!                    ▼
//!              ListExtractor (summary size + title rows)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types
pub mod types;

/// Source configuration
pub mod config;

/// Page fetching over HTTP
pub mod http;

/// List page extraction
pub mod extract;

/// Multi-page retrieval
pub mod pagination;

/// Result caching
pub mod cache;

/// Cached list source
pub mod source;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::SourceConfig;
pub use error::{Error, Result};
pub use source::{HttpListSource, ListSource};
pub use types::{ListConfig, ListKind, MovieRecord};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
