//! Azure Read client configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Azure Computer Vision Read client.
///
/// Both the endpoint and the key are required; a process that cannot
/// provide them should fail at startup.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct AzureConfig {
    /// Computer Vision resource endpoint
    #[cfg_attr(
        feature = "config",
        arg(long = "endpoint", env = "AZURE_COMPUTER_VISION_ENDPOINT")
    )]
    pub endpoint: Url,

    /// Computer Vision subscription key
    #[cfg_attr(
        feature = "config",
        arg(long = "key", env = "AZURE_COMPUTER_VISION_KEY", hide_env_values = true)
    )]
    pub key: String,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("key", &"<redacted>")
            .field("http_timeout", &self.http_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl AzureConfig {
    /// Create a new configuration for the given endpoint and key.
    pub fn new(endpoint: impl AsRef<str>, key: impl Into<String>) -> Result<Self> {
        let endpoint = Url::parse(endpoint.as_ref()).map_err(|e| {
            Error::config(format!("Invalid endpoint '{}': {}", endpoint.as_ref(), e))
        })?;

        Ok(Self {
            endpoint,
            key: key.into(),
            http_timeout: default_timeout_secs(),
            user_agent: None,
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(Error::config("key cannot be empty"));
        }
        if self.endpoint.cannot_be_a_base() {
            return Err(Error::config(format!(
                "endpoint '{}' cannot be used as a base URL",
                self.endpoint
            )));
        }
        Ok(())
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(Self::default_user_agent)
    }

    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("visionread/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = timeout_secs;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds `{endpoint}/vision/v3.2/read/{segments..}`.
    pub(crate) fn read_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| Error::config(format!("endpoint '{}' cannot be a base", self.endpoint)))?
            .pop_if_empty()
            .extend(["vision", "v3.2", "read"])
            .extend(segments);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://example.cognitiveservices.azure.com/";

    #[test]
    fn test_new_config() {
        let config = AzureConfig::new(ENDPOINT, "secret").unwrap();
        assert_eq!(config.http_timeout, 30);
        assert!(config.user_agent.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(AzureConfig::new("not a url", "secret").is_err());
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let config = AzureConfig::new(ENDPOINT, "  ").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AzureConfig::new(ENDPOINT, "super-secret-key").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_read_url_with_trailing_slash() {
        let config = AzureConfig::new(ENDPOINT, "secret").unwrap();
        let url = config.read_url(&["analyze"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.cognitiveservices.azure.com/vision/v3.2/read/analyze"
        );
    }

    #[test]
    fn test_read_url_without_trailing_slash() {
        let config = AzureConfig::new("https://example.com/proxy", "secret").unwrap();
        let url = config.read_url(&["analyzeResults", "abc"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/proxy/vision/v3.2/read/analyzeResults/abc"
        );
    }

    #[test]
    fn test_effective_values() {
        let config = AzureConfig::new(ENDPOINT, "secret")
            .unwrap()
            .with_timeout(0)
            .with_user_agent("custom/1.0");
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(config.effective_user_agent(), "custom/1.0");

        let config = AzureConfig::new(ENDPOINT, "secret").unwrap();
        assert!(config.effective_user_agent().starts_with("visionread/"));
    }
}
