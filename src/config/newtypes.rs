//! Validated newtype wrappers for configuration values.

use crate::error::ConfigError;
use std::fmt;

/// A validated base URL for the Bitbucket REST API.
///
/// The URL must carry an alphabetic scheme and a non-empty host. Trailing
/// slashes are trimmed so request paths can be appended with a single `/`.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::HostUrl;
///
/// let url = HostUrl::new("https://api.bitbucket.org/2.0/").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("api.bitbucket.org"));
/// assert_eq!(url.as_ref(), "https://api.bitbucket.org/2.0");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl HostUrl {
    /// The public Bitbucket Cloud API root.
    pub const BITBUCKET_CLOUD: &'static str = "https://api.bitbucket.org/2.0";

    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL has no scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidHostUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidHostUrl { url });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidHostUrl { url });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidHostUrl { url });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }

    /// Appends a request path to this URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

impl Default for HostUrl {
    fn default() -> Self {
        let url = Self::BITBUCKET_CLOUD.to_string();
        Self {
            scheme_end: 5,
            host_start: 8,
            host_end: 8 + "api.bitbucket.org".len(),
            url,
        }
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for HostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
