//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LOYVERSE_API_KEY` - Loyverse personal access token (sent as a bearer token)
//!
//! ## Optional
//! - `LOYVERSE_BASE_URL` - API base URL (default: `https://api.loyverse.com/v1.0`)
//! - `LOYVERSE_PAGE_LIMIT` - Items requested per page, 1-250 (default: 250)
//! - `LOYVERSE_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Loyverse API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.loyverse.com/v1.0";

/// Largest page Loyverse will return.
pub const MAX_PAGE_LIMIT: u32 = 250;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Loyverse API client configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct LoyverseConfig {
    /// Personal access token
    pub api_key: SecretString,
    /// Base URL every resource path is appended to
    pub base_url: Url,
    /// `limit` query parameter for paginated fetches
    pub page_limit: u32,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for LoyverseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoyverseConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url.as_str())
            .field("page_limit", &self.page_limit)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LoyverseConfig {
    /// Build a configuration with default settings for the given key.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in base URL; the `Result` mirrors
    /// [`Self::with_base_url`].
    pub fn new(api_key: SecretString) -> Result<Self, ConfigError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Build a configuration pointing at a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute
    /// http(s) URL.
    pub fn with_base_url(api_key: SecretString, base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key,
            base_url: parse_base_url(base_url)?,
            page_limit: MAX_PAGE_LIMIT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `LOYVERSE_API_KEY` is missing or an optional
    /// variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = get_required_env("LOYVERSE_API_KEY")?;
        if let Some(pattern) = placeholder_pattern(&api_key) {
            tracing::warn!("LOYVERSE_API_KEY looks like a placeholder (contains '{pattern}')");
        }

        let base_url = get_env_or_default("LOYVERSE_BASE_URL", DEFAULT_BASE_URL);
        let mut config = Self::with_base_url(SecretString::from(api_key), &base_url)?;

        if let Some(limit) = get_optional_env("LOYVERSE_PAGE_LIMIT") {
            config.page_limit = parse_page_limit(&limit)?;
        }

        if let Some(secs) = get_optional_env("LOYVERSE_TIMEOUT_SECS") {
            let secs = secs.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("LOYVERSE_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// The `Authorization` header value.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("LOYVERSE_BASE_URL".to_string(), msg);

    let url = Url::parse(raw.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url)
}

fn parse_page_limit(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("LOYVERSE_PAGE_LIMIT".to_string(), msg);

    let limit = raw.parse::<u32>().map_err(|e| invalid(e.to_string()))?;
    if limit == 0 || limit > MAX_PAGE_LIMIT {
        return Err(invalid(format!("must be between 1 and {MAX_PAGE_LIMIT}")));
    }
    Ok(limit)
}

/// Returns the first placeholder pattern found in `secret`, if any.
fn placeholder_pattern(secret: &str) -> Option<&'static str> {
    let lower = secret.to_lowercase();
    PLACEHOLDER_PATTERNS
        .iter()
        .copied()
        .find(|pattern| lower.contains(pattern))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoyverseConfig::new(SecretString::from("3f1c9a7e5b2d4c8e")).unwrap();
        assert_eq!(config.base_url.as_str(), "https://api.loyverse.com/v1.0");
        assert_eq!(config.page_limit, 250);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_bearer_header() {
        let config = LoyverseConfig::new(SecretString::from("abc123")).unwrap();
        assert_eq!(config.bearer(), "Bearer abc123");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = LoyverseConfig::new(SecretString::from("super-private-token")).unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-private-token"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let url = parse_base_url("http://localhost:8080/v1.0/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v1.0");
    }

    #[test]
    fn test_base_url_rejects_other_schemes() {
        assert!(matches!(
            parse_base_url("ftp://api.loyverse.com"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_page_limit_bounds() {
        assert_eq!(parse_page_limit("100").unwrap(), 100);
        assert!(parse_page_limit("0").is_err());
        assert!(parse_page_limit("251").is_err());
        assert!(parse_page_limit("many").is_err());
    }

    #[test]
    fn test_placeholder_detection() {
        assert_eq!(placeholder_pattern("your-api-key"), Some("your-"));
        assert_eq!(placeholder_pattern("CHANGEME"), Some("changeme"));
        assert_eq!(placeholder_pattern("9b2f7c41d0e84a6f"), None);
    }
}
