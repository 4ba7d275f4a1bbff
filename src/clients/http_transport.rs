//! HTTP transport for Bitbucket API communication.
//!
//! This module provides [`HttpTransport`], the bundled [`Transport`]
//! implementation backed by `reqwest`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{Listener, Transport};
use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{BitbucketConfig, HostUrl};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP transport for the Bitbucket REST API.
///
/// The transport handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent and Accept
/// - Mapping of non-2xx responses to [`HttpError::Response`]
///
/// As a [`Transport`], each dispatched request runs on its own task on the
/// current Tokio runtime and the listener is notified from that task.
///
/// # Thread Safety
///
/// `HttpTransport` is `Send + Sync` and cheap to clone.
///
/// # Example
///
/// ```rust,ignore
/// use bitbucket_api::{BitbucketConfig, HttpMethod, HttpRequest, HttpTransport};
///
/// let transport = HttpTransport::new(&BitbucketConfig::default())?;
/// let request = HttpRequest::builder(HttpMethod::Get, "user").build()?;
/// let response = transport.send(&request).await?;
/// println!("{}", response.body);
/// ```
#[derive(Clone, Debug)]
pub struct HttpTransport {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL every request path is appended to.
    base_url: HostUrl,
    /// Default headers to include in all requests.
    default_headers: Arc<HashMap<String, String>>,
}

// Verify HttpTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTransport>();
};

impl HttpTransport {
    /// Creates a new transport from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &BitbucketConfig) -> Result<Self, HttpError> {
        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Bitbucket API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            default_headers: Arc::new(default_headers),
        })
    }

    /// Returns the base URL for this transport.
    #[must_use]
    pub const fn base_url(&self) -> &HostUrl {
        &self.base_url
    }

    /// Returns the default headers for this transport.
    #[must_use]
    pub fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request and waits for the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.base_url.join(&request.path);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.request_headers(request) {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;
        let response = HttpResponse::new(code, res_headers, body_text);

        if response.is_ok() {
            return Ok(response);
        }

        tracing::debug!(
            "Bitbucket API returned {} for {} {}",
            code,
            request.http_method,
            request.path
        );
        Err(HttpError::Response(HttpResponseError {
            code,
            message: Self::error_message(&response.body),
            error_reference: response.request_id().map(String::from),
        }))
    }

    /// Collects the headers for `request`, keyed by lowercase name.
    ///
    /// Request headers replace transport defaults of the same name in any
    /// case, so each header is sent once.
    fn request_headers(&self, request: &HttpRequest) -> HashMap<String, String> {
        let mut headers: HashMap<String, String> = self
            .default_headers
            .iter()
            .map(|(key, value)| (key.to_lowercase(), value.clone()))
            .collect();
        if request.body.is_some() {
            headers.insert("content-type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.to_lowercase(), value.clone());
            }
        }
        headers
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Extracts the human-readable message from a Bitbucket error body.
    ///
    /// Recognized shapes, in order:
    /// - `{"error": {"message": "..."}}` (Cloud)
    /// - `{"errors": [{"message": "..."}]}` (Server)
    /// - `{"error": {"detail": "..."}}`
    /// - `{"message": "..."}`
    ///
    /// Anything else is returned as the raw body.
    fn error_message(body: &str) -> String {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
            let candidates = [
                json.get("error").and_then(|e| e.get("message")),
                json.get("errors")
                    .and_then(|e| e.as_array())
                    .and_then(|arr| arr.first())
                    .and_then(|e| e.get("message")),
                json.get("error").and_then(|e| e.get("detail")),
                json.get("message"),
            ];
            if let Some(message) = candidates
                .into_iter()
                .flatten()
                .find_map(serde_json::Value::as_str)
            {
                return message.to_string();
            }
        }
        body.to_string()
    }
}

impl Transport for HttpTransport {
    fn dispatch(&self, request: HttpRequest, listener: Listener) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(
                "No Tokio runtime available to dispatch {} {}",
                request.http_method,
                request.path
            );
            listener.notify(Err(HttpError::NoRuntime));
            return;
        };

        let transport = self.clone();
        handle.spawn(async move {
            let outcome = transport.send(&request).await;
            listener.notify(outcome);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use std::sync::Mutex;

    fn transport() -> HttpTransport {
        HttpTransport::new(&BitbucketConfig::default()).unwrap()
    }

    #[test]
    fn test_transport_uses_configured_base_url() {
        let config = BitbucketConfig::builder()
            .base_url(HostUrl::new("http://localhost:7990/rest/api/2.0").unwrap())
            .build()
            .unwrap();
        let transport = HttpTransport::new(&config).unwrap();

        assert_eq!(transport.base_url().as_ref(), "http://localhost:7990/rest/api/2.0");
    }

    #[test]
    fn test_user_agent_header_format() {
        let user_agent = transport()
            .default_headers()
            .get("User-Agent")
            .cloned()
            .unwrap();
        assert!(user_agent.starts_with("Bitbucket API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = BitbucketConfig::builder()
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let transport = HttpTransport::new(&config).unwrap();

        let user_agent = transport.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("Bitbucket API Library"));
    }

    #[test]
    fn test_accept_header_is_json() {
        assert_eq!(
            transport().default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_request_headers_replace_defaults_case_insensitively() {
        let request = HttpRequest::builder(HttpMethod::Post, "user/emails")
            .body(serde_json::json!({"email": "a@b.c"}))
            .header("accept", "text/plain")
            .header("Content-Type", "application/json; charset=utf-8")
            .build()
            .unwrap();

        let headers = transport().request_headers(&request);

        assert_eq!(headers.get("accept").map(String::as_str), Some("text/plain"));
        assert_eq!(
            headers.get("content-type").map(String::as_str),
            Some("application/json; charset=utf-8")
        );
        assert!(headers.contains_key("user-agent"));
        assert!(headers.keys().all(|key| *key == key.to_lowercase()));
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_dispatch_without_runtime_notifies_no_runtime() {
        let result = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&result);
        let listener = Listener::new(move |outcome: Result<serde_json::Value, ApiError>| {
            *sink.lock().unwrap() = Some(outcome);
        });

        let request = HttpRequest::builder(HttpMethod::Get, "user").build().unwrap();
        transport().dispatch(request, listener);

        let outcome = result.lock().unwrap().take().unwrap();
        assert!(matches!(
            outcome,
            Err(ApiError::Transport(HttpError::NoRuntime))
        ));
    }

    #[test]
    fn test_error_message_cloud_format() {
        let body = r#"{"type": "error", "error": {"message": "Repository not found"}}"#;
        assert_eq!(HttpTransport::error_message(body), "Repository not found");
    }

    #[test]
    fn test_error_message_server_format() {
        let body = r#"{"errors": [{"message": "Pull request is already merged"}]}"#;
        assert_eq!(
            HttpTransport::error_message(body),
            "Pull request is already merged"
        );
    }

    #[test]
    fn test_error_message_detail_format() {
        let body = r#"{"error": {"detail": "Token expired"}}"#;
        assert_eq!(HttpTransport::error_message(body), "Token expired");
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(
            HttpTransport::error_message("Bad Gateway"),
            "Bad Gateway"
        );
    }
}
