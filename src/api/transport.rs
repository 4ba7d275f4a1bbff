//! The transport contract consumed by API objects.
//!
//! A transport performs the actual network I/O. It receives a fully built
//! [`HttpRequest`] and a [`Listener`], and notifies the listener when the
//! request completes. The bundled implementation is
//! [`HttpTransport`](crate::clients::HttpTransport); tests use
//! [`MockTransport`](crate::api::mock::MockTransport).

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::api::Listener;
use crate::clients::{HttpMethod, HttpRequest, InvalidHttpRequestError};

/// An HTTP client able to dispatch requests without blocking the caller.
///
/// Implementations must be `Send + Sync`: one transport is shared by every
/// API object built from it. `dispatch` must not block; the listener is
/// notified when the outcome is known, normally exactly once. Listeners
/// ignore any notification after the first.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `request` and notifies `listener` with the outcome.
    fn dispatch(&self, request: HttpRequest, listener: Listener);

    /// Sends a GET request.
    fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
        headers: Option<HashMap<String, String>>,
        listener: Listener,
    ) {
        let request = prepare(HttpMethod::Get, path, None, query, headers);
        dispatch_checked(self, request, listener);
    }

    /// Sends a POST request.
    fn post(
        &self,
        path: &str,
        body: Option<Value>,
        headers: Option<HashMap<String, String>>,
        listener: Listener,
    ) {
        let request = prepare(HttpMethod::Post, path, body, None, headers);
        dispatch_checked(self, request, listener);
    }

    /// Sends a PUT request.
    fn put(
        &self,
        path: &str,
        body: Option<Value>,
        headers: Option<HashMap<String, String>>,
        listener: Listener,
    ) {
        let request = prepare(HttpMethod::Put, path, body, None, headers);
        dispatch_checked(self, request, listener);
    }

    /// Sends a DELETE request.
    fn delete(
        &self,
        path: &str,
        body: Option<Value>,
        headers: Option<HashMap<String, String>>,
        listener: Listener,
    ) {
        let request = prepare(HttpMethod::Delete, path, body, None, headers);
        dispatch_checked(self, request, listener);
    }
}

fn prepare(
    method: HttpMethod,
    path: &str,
    body: Option<Value>,
    query: Option<HashMap<String, String>>,
    headers: Option<HashMap<String, String>>,
) -> Result<HttpRequest, InvalidHttpRequestError> {
    let mut builder = HttpRequest::builder(method, path).maybe_body(body);
    if let Some(query) = query {
        builder = builder.query(query);
    }
    if let Some(headers) = headers {
        builder = builder.extra_headers(headers);
    }
    builder.build()
}

// Invalid requests are reported through the listener, never synchronously.
fn dispatch_checked<T: Transport + ?Sized>(
    transport: &T,
    request: Result<HttpRequest, InvalidHttpRequestError>,
    listener: Listener,
) {
    match request {
        Ok(request) => transport.dispatch(request, listener),
        Err(error) => listener.notify(Err(error.into())),
    }
}
