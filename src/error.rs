//! Error types for imdb-list
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for imdb-list
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Retrieval Errors
    // ============================================================================
    #[error("Unable to get imdb list (page {page}): {reason}")]
    Access { page: u64, reason: String },

    #[error("Unable to get page {page} of imdb list: {reason}")]
    PageFetch { page: u64, reason: String },

    #[error("Retrieval cancelled before page {page}")]
    Cancelled { page: u64 },

    // ============================================================================
    // Cache Errors
    // ============================================================================
    #[error("Cache error: {message}")]
    Cache { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// First page could not be retrieved
    pub fn access(reason: impl Into<String>) -> Self {
        Self::Access {
            page: 1,
            reason: reason.into(),
        }
    }

    /// A page after the first could not be retrieved
    pub fn page_fetch(page: u64, reason: impl Into<String>) -> Self {
        Self::PageFetch {
            page,
            reason: reason.into(),
        }
    }

    /// Create a cache error
    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Page index a retrieval failure refers to, if any
    pub fn page(&self) -> Option<u64> {
        match self {
            Error::Access { page, .. }
            | Error::PageFetch { page, .. }
            | Error::Cancelled { page } => Some(*page),
            _ => None,
        }
    }
}

/// Result type alias for imdb-list
pub type Result<T> = std::result::Result<T, Error>;
