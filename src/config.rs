//! Client configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.
//! The config is threaded explicitly into [`crate::solr::ItisClient`] so tests
//! can substitute a fixture endpoint; there is no process-wide default client.

use std::time::Duration;

/// Production ITIS SOLR endpoint.
pub const DEFAULT_BASE_URL: &str = "https://services.itis.gov/";
/// Default network timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the ITIS search client.
#[derive(Debug, Clone)]
pub struct ItisConfig {
    /// Base URL of the SOLR search endpoint.
    pub base_url: String,
    /// Network timeout applied to each outbound request.
    pub timeout: Duration,
}

impl Default for ItisConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ItisConfig {
    /// Creates a new builder for `ItisConfig`.
    #[must_use]
    pub fn builder() -> ItisConfigBuilder {
        ItisConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// Reads `ITIS_BASE_URL` and `ITIS_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::builder().from_env().build()
    }
}

/// Builder for [`ItisConfig`].
#[derive(Debug, Clone, Default)]
pub struct ItisConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ItisConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if self.base_url.is_none() {
            self.base_url = std::env::var("ITIS_BASE_URL").ok();
        }
        if self.timeout.is_none() {
            self.timeout = std::env::var("ITIS_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs);
        }
        self
    }

    /// Sets the base URL of the SOLR endpoint.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the network timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Builds the [`ItisConfig`], applying defaults for unset fields.
    #[must_use]
    pub fn build(self) -> ItisConfig {
        ItisConfig {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ItisConfig::builder().build();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ItisConfig::builder()
            .base_url("http://127.0.0.1:8983/solr/itis/select")
            .timeout(Duration::from_secs(5))
            .build();
        assert_eq!(config.base_url, "http://127.0.0.1:8983/solr/itis/select");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_default_matches_builder() {
        let config = ItisConfig::default();
        assert_eq!(config.base_url, ItisConfig::builder().build().base_url);
    }
}
