//! HTTP response type handed from a transport to a listener.
//!
//! The body is kept as raw text; turning it into a JSON value is the
//! listener's job (see [`crate::api::Listener`]), since some Bitbucket
//! endpoints (`diff`, `patch`) answer with plain text.

use std::collections::HashMap;

/// A raw HTTP response from the Bitbucket API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`. Header names are lowercased.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, values)| (name.to_lowercase(), values))
            .collect();
        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Creates a `200 OK` response with a JSON body and no headers.
    #[must_use]
    pub fn json(body: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            vec!["application/json".to_string()],
        );
        Self::new(200, headers, body.to_string())
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns `true` when the `Content-Type` header declares JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .is_some_and(|value| value.contains("json"))
    }
}
