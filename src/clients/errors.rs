//! HTTP-specific error types for the Bitbucket API client.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all transport failures
//!
//! # Example
//!
//! ```rust,ignore
//! use bitbucket_api::clients::HttpError;
//!
//! match transport.send(&request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//!     Err(HttpError::NoRuntime) => println!("No Tokio runtime"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// `message` holds the human readable text Bitbucket put in the error
/// envelope (`{"type": "error", "error": {"message": "..."}}`), or the raw
/// body when the envelope could not be parsed.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "Repository alice/proj not found".to_string(),
///     error_reference: Some("b1c2".to_string()),
/// };
///
/// assert_eq!(error.to_string(), "HTTP 404: Repository alice/proj not found");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Error message extracted from the response body.
    pub message: String,
    /// Reference ID for error reporting (from the `X-Request-Id` header).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path is empty.
    #[error("Cannot send a request without a path.")]
    EmptyPath,

    /// A GET request was given a body.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method that does not take a body.
        method: String,
    },
}

/// Unified error type for all transport failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request was dispatched outside of a Tokio runtime.
    #[error("No Tokio runtime is available to dispatch the request.")]
    NoRuntime,
}

impl HttpError {
    /// Returns the HTTP status code when the failure came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidRequest(_) | Self::NoRuntime => None,
        }
    }
}
