//! Error types for the Bitbucket API client.
//!
//! This module contains the configuration error type. Errors raised while
//! calling API methods live in [`crate::api::ApiError`], and transport
//! failures in [`crate::clients::HttpError`].
//!
//! # Example
//!
//! ```rust
//! use bitbucket_api::{ConfigError, HostUrl};
//!
//! let result = HostUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidHostUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.bitbucket.org/2.0').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The user agent prefix cannot be sent as a header value.
    #[error("Invalid user agent prefix '{prefix}'. Control characters are not allowed in header values.")]
    InvalidUserAgentPrefix {
        /// The rejected prefix.
        prefix: String,
    },
}
