//! Common types used throughout imdb-list
//!
//! List configuration, the movie records produced from a list, and
//! shared enums used by the HTTP layer.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Pattern an IMDb user id must match
pub const USER_ID_PATTERN: &str = r"^ur\d{7,8}$";

static USER_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(USER_ID_PATTERN).unwrap());

/// List names served under `/user/<id>/<list>`
pub const RESERVED_LISTS: [&str; 3] = ["watchlist", "ratings", "checkins"];

// ============================================================================
// List Configuration
// ============================================================================

/// Which list to retrieve and for which account
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListConfig {
    /// IMDb user id (`urXXXXXXX`)
    pub user_id: String,
    /// Reserved list name or a public list id
    pub list: String,
}

impl ListConfig {
    /// Create a new list config
    pub fn new(user_id: impl Into<String>, list: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            list: list.into(),
        }
    }

    /// Classify the list name
    pub fn kind(&self) -> ListKind {
        ListKind::of(&self.list)
    }

    /// Check the user id pattern and list name.
    ///
    /// Retrieval assumes a validated config and never calls this itself.
    pub fn validate(&self) -> Result<()> {
        if !USER_ID_REGEX.is_match(&self.user_id) {
            return Err(Error::invalid_value(
                "user_id",
                "user_id must be in the form urXXXXXXX",
            ));
        }
        if self.list.is_empty() {
            return Err(Error::missing_field("list"));
        }
        Ok(())
    }
}

impl fmt::Display for ListConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user_id, self.list)
    }
}

/// Whether a list name is one of the per-user reserved lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `watchlist`, `ratings` or `checkins`
    Reserved,
    /// Any other name, treated as a public list id
    Custom,
}

impl ListKind {
    /// Classify a list name
    pub fn of(list: &str) -> Self {
        if RESERVED_LISTS.contains(&list) {
            Self::Reserved
        } else {
            Self::Custom
        }
    }
}

// ============================================================================
// Movie Record
// ============================================================================

/// One movie from a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Anchor text of the listing row
    pub title: String,
    /// Absolute title URL without trailing slash
    #[serde(rename = "url")]
    pub canonical_url: String,
    /// IMDb id parsed from the URL, empty when none was found
    #[serde(rename = "imdb_id")]
    pub external_id: String,
    /// Same as `title`
    #[serde(rename = "imdb_name")]
    pub display_name: String,
}

impl MovieRecord {
    /// Whether an IMDb id could be extracted for this record
    pub fn has_id(&self) -> bool {
        !self.external_id.is_empty()
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff strategy for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
