//! The base object every resource API is built on.
//!
//! [`AbstractApi`] holds the shared transport and per-API options, creates
//! listeners, and dispatches requests. It never fails synchronously: every
//! transport outcome reaches the caller through the callback.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::api::{ApiError, Callback, Listener, Transport};
use crate::clients::HttpRequest;

/// Options applied to every request an API object sends.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::api::ApiOptions;
///
/// let options = ApiOptions::new().header("X-Request-Origin", "release-bot");
/// assert_eq!(options.headers().get("X-Request-Origin").map(String::as_str), Some("release-bot"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiOptions {
    headers: HashMap<String, String>,
}

impl ApiOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header sent with every request unless the request sets it.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Returns the default headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

/// Shared transport plus options, with the listener factory.
///
/// Cloning is cheap: the transport and options are reference counted.
#[derive(Clone, Debug)]
pub struct AbstractApi {
    transport: Arc<dyn Transport>,
    options: Arc<ApiOptions>,
}

// Verify AbstractApi is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AbstractApi>();
};

impl AbstractApi {
    /// Creates the base object over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, options: ApiOptions) -> Self {
        Self {
            transport,
            options: Arc::new(options),
        }
    }

    /// Returns the shared transport.
    #[must_use]
    pub const fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Returns the options.
    #[must_use]
    pub fn options(&self) -> &ApiOptions {
        &self.options
    }

    /// Creates a one-shot listener firing `callback`.
    pub fn create_listener<F>(&self, callback: F) -> Listener
    where
        F: FnOnce(Result<Value, ApiError>) + Send + 'static,
    {
        Listener::new(callback)
    }

    /// Hands `request` to the transport; the outcome is delivered to `callback`.
    pub fn dispatch(&self, mut request: HttpRequest, callback: Callback) {
        request.merge_default_headers(self.options.headers());
        tracing::debug!(
            "Dispatching {} request to {}",
            request.http_method,
            request.path
        );
        let listener = self.create_listener(callback);
        self.transport.dispatch(request, listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::clients::HttpMethod;
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn test_dispatch_merges_option_headers() {
        let transport = Arc::new(MockTransport::new());
        let api = AbstractApi::new(
            transport.clone(),
            ApiOptions::new().header("X-Trace", "on"),
        );

        let request = HttpRequest::builder(HttpMethod::Get, "user").build().unwrap();
        api.dispatch(request, Box::new(|_| {}));

        let sent = transport.last_request().unwrap();
        assert_eq!(
            sent.extra_headers.unwrap().get("X-Trace"),
            Some(&"on".to_string())
        );
    }

    #[test]
    fn test_dispatch_delivers_transport_result() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_json(json!({"username": "alice"}));
        let api = AbstractApi::new(transport, ApiOptions::default());

        let result = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&result);
        let request = HttpRequest::builder(HttpMethod::Get, "user").build().unwrap();
        api.dispatch(
            request,
            Box::new(move |outcome: Result<Value, ApiError>| {
                *sink.lock().unwrap() = Some(outcome.unwrap());
            }),
        );

        assert_eq!(
            result.lock().unwrap().clone(),
            Some(json!({"username": "alice"}))
        );
    }

    #[test]
    fn test_create_listener_is_independent_per_call() {
        let api = AbstractApi::new(Arc::new(MockTransport::new()), ApiOptions::default());
        let first = api.create_listener(|_| {});
        let second = api.create_listener(|_| {});

        first.notify(Err(crate::clients::HttpError::NoRuntime));
        assert!(first.is_fired());
        assert!(!second.is_fired());
    }
}
