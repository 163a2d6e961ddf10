//! Client configuration.

use std::time::Duration;

use crate::retry::RetryPolicy;

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "QUILL_API_URL";

/// Base URL used when the environment does not provide one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Client configuration.
///
/// Policy constants (timeout budgets, retry bounds) live here rather than
/// as module globals so tests can inject near-zero delays per instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL all request paths are joined onto.
    pub base_url: String,
    /// Timeout budget for the standard verbs.
    pub timeout: Duration,
    /// Timeout budget for long-running operations (`post_slow`, `upload`).
    pub slow_timeout: Duration,
    /// Retry policy for retry-eligible operations.
    pub retry: RetryPolicy,
    /// Default headers attached to every request.
    pub default_headers: Vec<(String, String)>,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            slow_timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
            default_headers: Vec::new(),
            user_agent: format!("quill-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration taking the base URL from `QUILL_API_URL`,
    /// falling back to the local default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Create a configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL for all requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the timeout budget for the standard verbs.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the timeout budget for long-running operations.
    pub fn slow_timeout(mut self, timeout: Duration) -> Self {
        self.config.slow_timeout = timeout;
        self
    }

    /// Set the retry policy.
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    /// Add a default header for all requests.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config
            .default_headers
            .push((name.into(), value.into()));
        self
    }

    /// Attach a bearer token to every request.
    pub fn bearer_auth(self, token: impl Into<String>) -> Self {
        self.default_header("Authorization", format!("Bearer {}", token.into()))
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
