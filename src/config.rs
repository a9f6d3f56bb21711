//! Source configuration
//!
//! Settings for where lists are fetched from, how the HTTP page fetcher
//! behaves, and how long retrieved lists stay cached. Loaded from YAML
//! or JSON files; every field has a default.

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default site root for list pages
pub const DEFAULT_BASE_URL: &str = "http://www.imdb.com";

/// Default cache validity window (2 hours)
pub const DEFAULT_CACHE_TTL_MINUTES: u64 = 120;

/// Longest accepted cache validity window (1 year)
pub const MAX_CACHE_TTL_MINUTES: u64 = 365 * 24 * 60;

// ============================================================================
// Top-Level Source Config
// ============================================================================

/// Complete source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Site root that list paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// How long a retrieved list is served from cache
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u64,

    /// Persist the cache to this JSON file instead of memory only
    #[serde(default)]
    pub cache_file: Option<PathBuf>,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
            cache_file: None,
            http: HttpConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_cache_ttl_minutes() -> u64 {
    DEFAULT_CACHE_TTL_MINUTES
}

impl SourceConfig {
    /// Load config from a file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            let config: Self = serde_json::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            Self::from_yaml(&contents)
        }
    }

    /// Parse config from a YAML string and validate it
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the base URL and cache window
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.cache_ttl_minutes == 0 {
            return Err(Error::invalid_value(
                "cache_ttl_minutes",
                "must be greater than zero",
            ));
        }
        if self.cache_ttl_minutes > MAX_CACHE_TTL_MINUTES {
            return Err(Error::invalid_value(
                "cache_ttl_minutes",
                format!("must be at most {MAX_CACHE_TTL_MINUTES}"),
            ));
        }
        Ok(())
    }

    /// Site root without trailing slash
    pub fn site(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Cache validity window
    pub fn cache_ttl(&self) -> Result<chrono::Duration> {
        i64::try_from(self.cache_ttl_minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes)
            .ok_or_else(|| {
                Error::invalid_value("cache_ttl_minutes", "out of range for a duration")
            })
    }

    /// Build the HTTP client config for the page fetcher
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                self.http.retry_backoff.backoff_type,
                Duration::from_millis(self.http.retry_backoff.initial_ms),
                Duration::from_millis(self.http.retry_backoff.max_ms),
            );

        builder = match &self.http.rate_limit {
            Some(limit) => builder.rate_limit(RateLimiterConfig::new(
                limit.requests_per_second,
                limit.burst_size,
            )),
            None => builder.no_rate_limit(),
        };

        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent);
        }

        builder.build()
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Rate limiting; `null` disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimitConfig>,

    /// Override the user agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            rate_limit: default_rate_limit(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_rate_limit() -> Option<RateLimitConfig> {
    Some(RateLimitConfig::default())
}

/// Backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per second limit
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,

    /// Burst size
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_rps(),
            burst_size: default_burst(),
        }
    }
}

fn default_rps() -> u32 {
    2
}

fn default_burst() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SourceConfig::default();
        assert_eq!(config.base_url, "http://www.imdb.com");
        assert_eq!(config.cache_ttl().unwrap(), chrono::Duration::hours(2));
        assert!(config.cache_file.is_none());
        assert_eq!(config.http.max_retries, 3);
        assert!(config.http.rate_limit.is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
base_url: "https://www.imdb.com/"
cache_ttl_minutes: 30
cache_file: /tmp/imdb-cache.json
http:
  timeout_seconds: 10
  max_retries: 1
  retry_backoff:
    type: linear
    initial_ms: 250
  rate_limit: null
"#;

        let config = SourceConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.site(), "https://www.imdb.com");
        assert_eq!(config.cache_ttl().unwrap(), chrono::Duration::minutes(30));
        assert_eq!(
            config.cache_file,
            Some(PathBuf::from("/tmp/imdb-cache.json"))
        );
        assert_eq!(config.http.retry_backoff.backoff_type, BackoffType::Linear);
        assert_eq!(config.http.retry_backoff.max_ms, 60000);
        assert!(config.http.rate_limit.is_none());

        let http = config.http_client_config();
        assert_eq!(http.timeout, Duration::from_secs(10));
        assert_eq!(http.max_retries, 1);
        assert_eq!(http.initial_backoff, Duration::from_millis(250));
        assert!(http.rate_limit.is_none());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = SourceConfig::from_yaml("{}").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cache_ttl_minutes, DEFAULT_CACHE_TTL_MINUTES);
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            SourceConfig::from_yaml("base_url: not a url"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            SourceConfig::from_yaml("base_url: ftp://www.imdb.com"),
            Err(Error::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_ttl() {
        let err = SourceConfig::from_yaml("cache_ttl_minutes: 0").unwrap_err();
        assert!(err.to_string().contains("cache_ttl_minutes"));
    }

    #[test]
    fn test_cache_ttl_upper_bound() {
        let config = SourceConfig::from_yaml("cache_ttl_minutes: 525600").unwrap();
        assert_eq!(config.cache_ttl().unwrap(), chrono::Duration::days(365));

        for minutes in ["525601", "4611686018427387904", "18446744073709551615"] {
            let yaml = format!("cache_ttl_minutes: {minutes}");
            let err = SourceConfig::from_yaml(&yaml).unwrap_err();
            assert!(err.to_string().contains("cache_ttl_minutes"), "{minutes}");
            assert!(matches!(err, Error::InvalidConfigValue { .. }), "{minutes}");
        }
    }

    #[test]
    fn test_cache_ttl_out_of_range_is_error() {
        let config = SourceConfig {
            cache_ttl_minutes: u64::MAX,
            ..SourceConfig::default()
        };
        assert!(matches!(
            config.cache_ttl(),
            Err(Error::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(matches!(
            SourceConfig::from_yaml("lists: []"),
            Err(Error::YamlParse(_))
        ));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"cache_ttl_minutes": 5}}"#).unwrap();

        let config = SourceConfig::from_file(file.path()).unwrap();
        assert_eq!(config.cache_ttl_minutes, 5);
    }

    #[test]
    fn test_from_missing_file() {
        let err = SourceConfig::from_file("/nonexistent/imdb-list.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
