//! HTTP page fetching
//!
//! The [`PageFetcher`] trait is the seam the list retriever talks to;
//! [`HttpClient`] is the reqwest-backed implementation.
//!
//! # Features
//!
//! - **Automatic Retries**: Retryable statuses and connect/timeout errors, with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff

mod client;
mod fetcher;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use fetcher::{FetchedPage, PageFetcher};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
