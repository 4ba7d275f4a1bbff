//! HTTP request types for the Bitbucket API client.
//!
//! This module provides the [`HttpRequest`] type and its builder. Request
//! bodies are always JSON.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Bitbucket REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and triggering actions.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// An HTTP request to be handed to a transport.
///
/// `path` is relative to the transport's base URL, e.g.
/// `repositories/alice/proj/pullrequests/42`.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "repositories/alice/proj/pullrequests")
///     .body(json!({"_body": {"title": "Fix build"}}))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.http_method, HttpMethod::Post);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path (relative to the base URL) for this request.
    pub path: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Query parameters to append to the URL.
    pub query: Option<HashMap<String, String>>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `path` is empty
    /// - `http_method` is `Get` and `body` is `Some`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim_matches('/').is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }

        if self.http_method == HttpMethod::Get && self.body.is_some() {
            return Err(InvalidHttpRequestError::UnexpectedBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }

    /// Merges `headers` into the request without overriding headers already set.
    ///
    /// Header names are compared case-insensitively.
    pub fn merge_default_headers(&mut self, headers: &HashMap<String, String>) {
        if headers.is_empty() {
            return;
        }
        let extra = self.extra_headers.get_or_insert_with(HashMap::new);
        for (key, value) in headers {
            if !extra.keys().any(|existing| existing.eq_ignore_ascii_case(key)) {
                extra.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    query: Option<HashMap<String, String>>,
    extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: None,
            extra_headers: None,
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the JSON request body when one is present.
    #[must_use]
    pub fn maybe_body(mut self, body: Option<serde_json::Value>) -> Self {
        self.body = body;
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets all extra headers at once.
    #[must_use]
    pub fn extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query: self.query,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Put.to_string(), "put");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "user/emails")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "user/emails");
        assert!(request.body.is_none());
    }

    #[test]
    fn test_post_without_body_is_allowed() {
        // approve/decline/merge are body-less POSTs
        let request = HttpRequest::builder(HttpMethod::Post, "repositories/a/b/pullrequests/5/approve")
            .build()
            .unwrap();
        assert!(request.body.is_none());
    }

    #[test]
    fn test_verify_rejects_empty_path() {
        let result = HttpRequest::builder(HttpMethod::Get, "/").build();
        assert!(matches!(result, Err(InvalidHttpRequestError::EmptyPath)));
    }

    #[test]
    fn test_verify_rejects_get_with_body() {
        let result = HttpRequest::builder(HttpMethod::Get, "user")
            .body(json!({"key": "value"}))
            .build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::UnexpectedBody { method }) if method == "get"
        ));
    }

    #[test]
    fn test_builder_with_query_params_and_headers() {
        let request = HttpRequest::builder(HttpMethod::Get, "user")
            .query_param("fields", "display_name")
            .header("X-Custom", "1")
            .build()
            .unwrap();

        assert_eq!(
            request.query.unwrap().get("fields"),
            Some(&"display_name".to_string())
        );
        assert_eq!(
            request.extra_headers.unwrap().get("X-Custom"),
            Some(&"1".to_string())
        );
    }

    #[test]
    fn test_merge_default_headers_keeps_request_values() {
        let mut request = HttpRequest::builder(HttpMethod::Get, "user")
            .header("Accept", "text/plain")
            .build()
            .unwrap();

        let mut defaults = HashMap::new();
        defaults.insert("Accept".to_string(), "application/json".to_string());
        defaults.insert("X-Trace".to_string(), "on".to_string());
        request.merge_default_headers(&defaults);

        let headers = request.extra_headers.unwrap();
        assert_eq!(headers.get("Accept"), Some(&"text/plain".to_string()));
        assert_eq!(headers.get("X-Trace"), Some(&"on".to_string()));
    }

    #[test]
    fn test_merge_default_headers_ignores_name_case() {
        let mut request = HttpRequest::builder(HttpMethod::Get, "user")
            .header("accept", "text/plain")
            .build()
            .unwrap();

        let mut defaults = HashMap::new();
        defaults.insert("Accept".to_string(), "application/json".to_string());
        request.merge_default_headers(&defaults);

        let headers = request.extra_headers.unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("accept"), Some(&"text/plain".to_string()));
    }
}
