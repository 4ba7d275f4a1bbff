//! One-shot listener adapter between a transport and a caller callback.
//!
//! A [`Listener`] wraps exactly one caller callback. The transport notifies
//! it with the raw outcome of a request; the listener normalizes that outcome
//! into `Result<Value, ApiError>` and fires the callback. Only the first
//! notification is delivered: later ones are dropped and logged, whichever
//! clone of the listener they arrive through.
//!
//! # Body Normalization
//!
//! - empty body → [`Value::Null`]
//! - JSON body → the parsed value
//! - non-JSON body (`text/plain` diffs and patches) → [`Value::String`]
//! - body declared `application/json` that does not parse → [`ApiError::Adapter`]
//!
//! Transport errors, including non-2xx responses, are forwarded unchanged as
//! [`ApiError::Transport`].

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::api::ApiError;
use crate::clients::{HttpError, HttpResponse};

/// The caller-side callback fired by a listener.
pub type Callback = Box<dyn FnOnce(Result<Value, ApiError>) + Send + 'static>;

/// A one-shot adapter turning a transport outcome into a callback call.
#[derive(Clone)]
pub struct Listener {
    slot: Arc<Mutex<Option<Callback>>>,
}

impl Listener {
    /// Wraps `callback` in a new listener.
    pub fn new<F>(callback: F) -> Self
    where
        F: FnOnce(Result<Value, ApiError>) + Send + 'static,
    {
        Self {
            slot: Arc::new(Mutex::new(Some(Box::new(callback)))),
        }
    }

    /// Delivers the transport outcome to the callback.
    ///
    /// Fires the callback on the first call only.
    pub fn notify(&self, outcome: Result<HttpResponse, HttpError>) {
        let callback = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let Some(callback) = callback else {
            tracing::warn!("Listener already fired; dropping duplicate transport notification");
            return;
        };

        callback(
            outcome
                .map_err(ApiError::from)
                .and_then(|response| normalize_body(&response)),
        );
    }

    /// Returns `true` once the callback has been fired.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("fired", &self.is_fired())
            .finish()
    }
}

/// Extracts the payload of a successful response.
///
/// # Errors
///
/// Returns [`ApiError::Adapter`] if the response declares a JSON content
/// type but its body does not parse.
pub fn normalize_body(response: &HttpResponse) -> Result<Value, ApiError> {
    let text = response.body.trim();
    if text.is_empty() {
        return Ok(Value::Null);
    }
    if response.header("content-type").is_none() {
        return Ok(serde_json::from_str(text)
            .unwrap_or_else(|_| Value::String(response.body.clone())));
    }
    if !response.is_json() {
        return Ok(Value::String(response.body.clone()));
    }
    serde_json::from_str(text).map_err(|e| {
        ApiError::Adapter(format!(
            "response declared JSON but the body does not parse: {e}"
        ))
    })
}
