//! Configuration types for the Bitbucket API client.
//!
//! # Overview
//!
//! - [`BitbucketConfig`]: settings consumed by the bundled HTTP transport
//! - [`BitbucketConfigBuilder`]: a builder for constructing [`BitbucketConfig`]
//! - [`HostUrl`]: a validated API base URL
//!
//! # Example
//!
//! ```rust
//! use bitbucket_api::{BitbucketConfig, HostUrl};
//! use std::time::Duration;
//!
//! let config = BitbucketConfig::builder()
//!     .base_url(HostUrl::new("https://api.bitbucket.org/2.0").unwrap())
//!     .user_agent_prefix("release-bot/1.2")
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.user_agent_prefix(), Some("release-bot/1.2"));
//! ```

mod newtypes;

pub use newtypes::HostUrl;

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for the bundled HTTP transport.
///
/// `BitbucketConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, Default)]
pub struct BitbucketConfig {
    base_url: HostUrl,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl BitbucketConfig {
    /// Creates a new builder for constructing a `BitbucketConfig`.
    #[must_use]
    pub fn builder() -> BitbucketConfigBuilder {
        BitbucketConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &HostUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify BitbucketConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BitbucketConfig>();
};

/// Builder for constructing [`BitbucketConfig`] instances.
///
/// # Defaults
///
/// - `base_url`: `https://api.bitbucket.org/2.0`
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (reqwest default)
#[derive(Debug, Default)]
pub struct BitbucketConfigBuilder {
    base_url: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl BitbucketConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: HostUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`BitbucketConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUserAgentPrefix`] if the prefix contains
    /// control characters.
    pub fn build(self) -> Result<BitbucketConfig, ConfigError> {
        if let Some(prefix) = &self.user_agent_prefix {
            if prefix.chars().any(char::is_control) {
                return Err(ConfigError::InvalidUserAgentPrefix {
                    prefix: prefix.clone(),
                });
            }
        }

        let base_url = self.base_url.unwrap_or_default();
        if base_url.as_ref() != HostUrl::BITBUCKET_CLOUD {
            tracing::debug!("Bitbucket client overriding default base URL with {}", base_url);
        }

        Ok(BitbucketConfig {
            base_url,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_to_bitbucket_cloud() {
        let config = BitbucketConfig::builder().build().unwrap();

        assert_eq!(config.base_url().as_ref(), HostUrl::BITBUCKET_CLOUD);
        assert!(config.user_agent_prefix().is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_builder_sets_all_fields() {
        let config = BitbucketConfig::builder()
            .base_url(HostUrl::new("http://localhost:7990/rest").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "http://localhost:7990/rest");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_builder_rejects_control_characters_in_prefix() {
        let result = BitbucketConfig::builder()
            .user_agent_prefix("MyApp\r\nX-Injected: 1")
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidUserAgentPrefix { .. })
        ));
    }

    #[test]
    fn test_config_default_matches_builder_default() {
        let built = BitbucketConfig::builder().build().unwrap();
        let default = BitbucketConfig::default();
        assert_eq!(built.base_url(), default.base_url());
    }
}
