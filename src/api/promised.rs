//! Future-returning view over any [`Methods`] implementation.
//!
//! [`Promised::call`] settles exactly once: with the response payload, the
//! transport error, or the synchronous validation error that prevented the
//! request from being sent.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::api::{ApiError, Args, Methods};

/// Wraps a methods provider so each method returns a future.
///
/// # Example
///
/// ```rust,ignore
/// let pulls = bitbucket.pull_requests().promised();
/// let pr = pulls.call("get", args!["alice", "proj", 42]).await?;
/// ```
#[derive(Clone, Debug)]
pub struct Promised<M> {
    methods: M,
}

impl<M: Methods> Promised<M> {
    /// Wraps `methods`.
    #[must_use]
    pub const fn new(methods: M) -> Self {
        Self { methods }
    }

    /// Returns the wrapped provider.
    #[must_use]
    pub const fn methods(&self) -> &M {
        &self.methods
    }

    /// Returns the names of every invocable method.
    #[must_use]
    pub fn method_names(&self) -> Vec<&'static str> {
        self.methods.method_names()
    }

    /// Invokes `method` and resolves with its outcome.
    ///
    /// # Errors
    ///
    /// Rejects with the validation error raised by the wrapped provider, or
    /// with the transport error delivered to the callback. If the callback is
    /// dropped without firing, rejects with [`ApiError::Adapter`].
    pub async fn call(&self, method: &str, args: Args) -> Result<Value, ApiError> {
        let (tx, rx) = oneshot::channel();
        self.methods.invoke(
            method,
            args,
            Box::new(move |outcome: Result<Value, ApiError>| {
                if tx.send(outcome).is_err() {
                    tracing::debug!("Promised result dropped: caller stopped waiting");
                }
            }),
        )?;

        rx.await.map_err(|_| {
            ApiError::Adapter(format!("{method}: callback dropped without a result"))
        })?
    }

    /// Invokes `method` and deserializes the payload into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call), plus [`ApiError::Json`] if the payload
    /// does not match `T`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        method: &str,
        args: Args,
    ) -> Result<T, ApiError> {
        let value = self.call(method, args).await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::{ApiOptions, Endpoint, ResourceDescriptor};
    use crate::args;
    use crate::clients::{HttpError, HttpResponseError};
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::Arc;

    static THINGS: ResourceDescriptor = ResourceDescriptor {
        api_name: "things",
        base: "things",
        methods: &[Endpoint::get("get", &["id"], "{id}")],
        fluids: &[],
    };

    fn promised() -> (Promised<crate::api::ApiObject>, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        let api = THINGS.create_api(transport.clone(), ApiOptions::default());
        (api.promised(), transport)
    }

    #[tokio::test]
    async fn test_call_resolves_with_payload() {
        let (promised, transport) = promised();
        transport.respond_json(json!({"name": "bolt"}));

        let value = promised.call("get", args![1]).await.unwrap();
        assert_eq!(value, json!({"name": "bolt"}));
    }

    #[tokio::test]
    async fn test_call_rejects_with_transport_error() {
        let (promised, transport) = promised();
        transport.fail_with(HttpError::Response(HttpResponseError {
            code: 404,
            message: "Not found".to_string(),
            error_reference: None,
        }));

        let error = promised.call("get", args![1]).await.unwrap_err();
        assert_eq!(error.status(), Some(404));
    }

    #[tokio::test]
    async fn test_call_rejects_validation_error_without_dispatch() {
        let (promised, transport) = promised();

        let error = promised.call("get", args![]).await.unwrap_err();
        assert!(error.is_validation());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_dropped_callback_rejects_with_adapter_error() {
        let (promised, transport) = promised();
        transport.hold();

        let pending = promised.call("get", args![1]);
        let dropper = Arc::clone(&transport);
        let (result, ()) = tokio::join!(pending, async move {
            tokio::task::yield_now().await;
            drop(dropper.take_held());
        });

        assert!(matches!(result, Err(ApiError::Adapter(_))));
    }

    #[tokio::test]
    async fn test_call_as_deserializes_payload() {
        #[derive(Deserialize)]
        struct Thing {
            name: String,
        }

        let (promised, transport) = promised();
        transport.respond_json(json!({"name": "nut"}));

        let thing: Thing = promised.call_as("get", args![2]).await.unwrap();
        assert_eq!(thing.name, "nut");
    }
}
