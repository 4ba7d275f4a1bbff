//! Error type for API method invocations.
//!
//! Validation failures ([`ApiError::InvalidArguments`], unknown names) are
//! returned synchronously from [`Methods::invoke`](crate::api::Methods::invoke)
//! before any I/O. Transport failures arrive asynchronously through the
//! callback as [`ApiError::Transport`], unchanged.

use thiserror::Error;

use crate::clients::HttpError;

/// Errors surfaced by API objects and their views.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A method received fewer positional arguments than it requires.
    #[error("{method}: expected at least {expected} argument(s), got {actual}")]
    InvalidArguments {
        /// The method that was called.
        method: String,
        /// The minimum number of arguments.
        expected: usize,
        /// The number of arguments received.
        actual: usize,
    },

    /// The resource has no method with this name.
    #[error("{resource} has no method named '{method}'")]
    UnknownMethod {
        /// The resource API name.
        resource: &'static str,
        /// The requested method name.
        method: String,
    },

    /// No bundled resource has this name.
    #[error("No resource named '{name}'")]
    UnknownResource {
        /// The requested resource name.
        name: String,
    },

    /// The resource declares no fluid view with this name.
    #[error("{resource} has no fluid view named '{fluid}'")]
    UnknownFluid {
        /// The resource API name.
        resource: &'static str,
        /// The requested fluid name.
        fluid: String,
    },

    /// An argument used as a path segment is an array or object.
    #[error("{method}: argument '{param}' cannot be used as a path segment")]
    InvalidPathSegment {
        /// The method that was called.
        method: &'static str,
        /// The parameter that could not be rendered.
        param: &'static str,
    },

    /// The transport reported a failure.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// Normalization failure: a callback dropped without firing, or a body
    /// that does not match its declared content type.
    #[error("Internal adapter error: {0}")]
    Adapter(String),

    /// A payload could not be converted to or from JSON.
    #[error("JSON conversion failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns `true` for errors raised before any request was dispatched.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidArguments { .. }
                | Self::UnknownMethod { .. }
                | Self::UnknownResource { .. }
                | Self::UnknownFluid { .. }
                | Self::InvalidPathSegment { .. }
        )
    }

    /// Returns the HTTP status code when the transport failed on a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_invalid_arguments_message_names_method_and_counts() {
        let error = ApiError::InvalidArguments {
            method: "get".to_string(),
            expected: 3,
            actual: 1,
        };
        assert_eq!(error.to_string(), "get: expected at least 3 argument(s), got 1");
        assert!(error.is_validation());
    }

    #[test]
    fn test_transport_error_passes_through_message() {
        let error = ApiError::from(HttpError::from(HttpResponseError {
            code: 404,
            message: "Not found".to_string(),
            error_reference: None,
        }));
        assert_eq!(error.to_string(), "HTTP 404: Not found");
        assert_eq!(error.status(), Some(404));
        assert!(!error.is_validation());
    }

    #[test]
    fn test_unknown_method_message() {
        let error = ApiError::UnknownMethod {
            resource: "pull_requests",
            method: "rebase".to_string(),
        };
        assert!(error.to_string().contains("'rebase'"));
    }
}
