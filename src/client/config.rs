//! Client configuration options.

use std::time::Duration;

/// Default API version path segment.
pub const DEFAULT_API_VERSION: &str = "v2";

/// Configuration for the REST client.
///
/// # Example
///
/// ```
/// use paca_rs::{ClientConfig, RetryConfig};
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0")
///     .with_retry(RetryConfig::default().with_retry_attempts(5));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout for a single HTTP exchange
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Retry configuration
    pub retry: RetryConfig,
    /// API version segment inserted between base URL and path
    pub api_version: String,
    /// Send the key pair as one `Authorization: Basic` header
    pub use_basic_auth: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("paca-rs/{}", env!("CARGO_PKG_VERSION")),
            retry: RetryConfig::default(),
            api_version: DEFAULT_API_VERSION.to_string(),
            use_basic_auth: false,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
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

    /// Set the API version segment (e.g. `"v1"`).
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Enable or disable basic-auth headers for key pair credentials.
    pub fn with_basic_auth(mut self, enabled: bool) -> Self {
        self.use_basic_auth = enabled;
        self
    }
}

/// Configuration for retrying rate-limited requests.
///
/// A response whose status is in `retry_statuses` is retried up to
/// `retry_attempts` times, waiting a fixed `retry_wait` before each retry.
/// When the attempts run out the call returns no content, unless
/// `raise_on_exhaustion` is set.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial attempt
    pub retry_attempts: u32,
    /// Wait before each retry
    pub retry_wait: Duration,
    /// HTTP status codes to retry on
    pub retry_statuses: Vec<u16>,
    /// Return the last retryable response as an error once attempts run out
    pub raise_on_exhaustion: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retry_attempts: 3,
            retry_wait: Duration::from_secs(3),
            retry_statuses: vec![429, 504],
            raise_on_exhaustion: false,
        }
    }
}

impl RetryConfig {
    /// Create a configuration with no retries.
    pub fn no_retry() -> Self {
        Self {
            retry_attempts: 0,
            ..Default::default()
        }
    }

    /// Set the number of retries.
    pub fn with_retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = attempts;
        self
    }

    /// Set the wait between attempts.
    pub fn with_retry_wait(mut self, wait: Duration) -> Self {
        self.retry_wait = wait;
        self
    }

    /// Set the status codes that trigger a retry.
    pub fn with_retry_statuses(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.retry_statuses = statuses.into_iter().collect();
        self
    }

    /// Return an API error instead of no content when retries run out.
    pub fn with_raise_on_exhaustion(mut self, raise: bool) -> Self {
        self.raise_on_exhaustion = raise;
        self
    }

    /// Check if a status code should be retried.
    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_version, "v2");
        assert!(!config.use_basic_auth);
        assert!(config.user_agent.starts_with("paca-rs/"));
    }

    #[test]
    fn test_default_retry() {
        let config = RetryConfig::default();
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_wait, Duration::from_secs(3));
        assert!(!config.raise_on_exhaustion);
    }

    #[test]
    fn test_should_retry_status() {
        let config = RetryConfig::default();
        assert!(config.should_retry_status(429));
        assert!(config.should_retry_status(504));
        assert!(!config.should_retry_status(503));
        assert!(!config.should_retry_status(404));
    }

    #[test]
    fn test_custom_retry_statuses() {
        let config = RetryConfig::no_retry().with_retry_statuses([503]);
        assert_eq!(config.retry_attempts, 0);
        assert!(config.should_retry_status(503));
        assert!(!config.should_retry_status(429));
    }
}
