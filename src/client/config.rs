//! Client configuration options.

use std::env;
use std::time::Duration;

use rand::Rng;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result};

/// Default API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.loyverse.com";

/// Default versioned path prefix.
pub const DEFAULT_API_VERSION: &str = "v1.0";

/// Configuration for the Loyverse client.
///
/// The access token is the only required value. It is validated when the
/// client is constructed, not when the first request is sent.
///
/// # Example
///
/// ```
/// use loyverse_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("my-token")
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
///
/// assert_eq!(config.base_url(), "https://api.loyverse.com/v1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token sent with every request
    pub access_token: Option<SecretString>,
    /// API host, without the version prefix
    pub api_base_url: String,
    /// Version path segment
    pub api_version: String,
    /// Overall request timeout
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Retry configuration
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("loyverse-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the given access token and default values.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::default().with_access_token(access_token)
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `LOYVERSE_ACCESS_TOKEN` | none |
    /// | `LOYVERSE_API_BASE_URL` | `https://api.loyverse.com` |
    /// | `LOYVERSE_API_VERSION` | `v1.0` |
    /// | `LOYVERSE_TIMEOUT_SECS` | `30` |
    /// | `LOYVERSE_CONNECT_TIMEOUT_SECS` | `10` |
    ///
    /// A missing token is not an error here; client construction rejects it.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(token) = env::var("LOYVERSE_ACCESS_TOKEN") {
            config = config.with_access_token(token);
        }
        if let Ok(url) = env::var("LOYVERSE_API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Ok(version) = env::var("LOYVERSE_API_VERSION") {
            config.api_version = version;
        }
        if let Some(secs) = env_secs("LOYVERSE_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_secs("LOYVERSE_CONNECT_TIMEOUT_SECS")? {
            config.connect_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the access token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(SecretString::from(token.into()));
        self
    }

    /// Set the API host (for example a mock server).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the API version path segment.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Full versioned base URL, e.g. `https://api.loyverse.com/v1.0`.
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }

    /// Returns the token if one is set and non-empty.
    pub(crate) fn token(&self) -> Option<&str> {
        self.access_token
            .as_ref()
            .map(|t| t.expose_secret())
            .filter(|t| !t.trim().is_empty())
    }
}

fn env_secs(name: &str) -> Result<Option<u64>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} must be a whole number of seconds", name))),
        Err(_) => Ok(None),
    }
}

/// Configuration for automatic retries.
///
/// By default every method is retried, including POST. The remote service
/// does not guarantee idempotency, so a retried POST after a timeout can
/// create a duplicate record. Use [`RetryConfig::idempotent_only`] to opt out.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first request
    pub max_retries: u32,
    /// Interval before the first retry
    pub initial_backoff: Duration,
    /// Multiplier applied to the interval after each retry
    pub backoff_factor: u32,
    /// Randomness applied to each interval, as a fraction (0.5 = ±50%)
    pub jitter: f64,
    /// Maximum backoff duration
    pub max_backoff: Duration,
    /// HTTP status codes to retry on
    pub retry_statuses: Vec<u16>,
    /// HTTP methods eligible for retry
    pub retry_methods: Vec<Method>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            backoff_factor: 2,
            jitter: 0.5,
            max_backoff: Duration::from_secs(30),
            retry_statuses: vec![429, 500, 502, 503, 504],
            retry_methods: vec![Method::GET, Method::POST, Method::PUT, Method::DELETE],
        }
    }
}

impl RetryConfig {
    /// Create a configuration with no retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Default policy restricted to methods that are safe to repeat.
    pub fn idempotent_only() -> Self {
        Self {
            retry_methods: vec![Method::GET, Method::PUT, Method::DELETE],
            ..Default::default()
        }
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Set the initial backoff duration.
    pub fn with_initial_backoff(mut self, duration: Duration) -> Self {
        self.initial_backoff = duration;
        self
    }

    /// Set the maximum backoff duration.
    pub fn with_max_backoff(mut self, duration: Duration) -> Self {
        self.max_backoff = duration;
        self
    }

    /// Set the jitter fraction. Clamped to `0.0..=1.0`.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    /// Base backoff for a given attempt, before jitter.
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let factor = self.backoff_factor.max(1).saturating_pow(attempt);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Backoff for a given attempt with jitter applied.
    pub fn jittered_backoff(&self, attempt: u32) -> Duration {
        let base = self.backoff_for_attempt(attempt);
        if self.jitter <= 0.0 {
            return base;
        }

        let spread = rand::thread_rng().gen_range(-self.jitter..=self.jitter);
        base.mul_f64(1.0 + spread).min(self.max_backoff)
    }

    /// Check if a status code should be retried.
    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Check if a method is eligible for retry.
    pub fn should_retry_method(&self, method: &Method) -> bool {
        self.retry_methods.contains(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.base_url(), "https://api.loyverse.com/v1.0");
        assert!(config.token().is_none());
    }

    #[test]
    fn test_blank_token_is_absent() {
        assert!(ClientConfig::new("   ").token().is_none());
        assert_eq!(ClientConfig::new("abc").token(), Some("abc"));
    }

    #[test]
    fn test_base_url_trims_slashes() {
        let config = ClientConfig::new("t")
            .with_api_base_url("http://127.0.0.1:8080/")
            .with_api_version("/v2/");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080/v2");
    }

    #[test]
    fn test_retry_backoff() {
        let config = RetryConfig::default();
        assert_eq!(config.backoff_for_attempt(0), Duration::from_millis(500));
        assert_eq!(config.backoff_for_attempt(1), Duration::from_millis(1000));
        assert_eq!(config.backoff_for_attempt(2), Duration::from_millis(2000));
    }

    #[test]
    fn test_retry_backoff_max() {
        let config = RetryConfig::default()
            .with_initial_backoff(Duration::from_secs(10))
            .with_max_backoff(Duration::from_secs(30));

        // 10 * 2^3 = 80, but capped at 30
        assert_eq!(config.backoff_for_attempt(3), Duration::from_secs(30));
    }

    #[test]
    fn test_jitter_bounds() {
        let config = RetryConfig::default();
        for attempt in 0..3 {
            let base = config.backoff_for_attempt(attempt);
            for _ in 0..50 {
                let delay = config.jittered_backoff(attempt);
                assert!(delay >= base.mul_f64(0.5), "{:?} below range", delay);
                assert!(delay <= base.mul_f64(1.5), "{:?} above range", delay);
            }
        }

        let exact = RetryConfig::default().with_jitter(0.0);
        assert_eq!(exact.jittered_backoff(1), Duration::from_secs(1));
    }

    #[test]
    fn test_should_retry_status() {
        let config = RetryConfig::default();
        assert!(config.should_retry_status(429));
        assert!(config.should_retry_status(503));
        assert!(!config.should_retry_status(404));
        assert!(!config.should_retry_status(401));
    }

    #[test]
    fn test_all_methods_retried_by_default() {
        let config = RetryConfig::default();
        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
            assert!(config.should_retry_method(&method));
        }

        let safe = RetryConfig::idempotent_only();
        assert!(!safe.should_retry_method(&Method::POST));
        assert!(safe.should_retry_method(&Method::GET));
    }
}
