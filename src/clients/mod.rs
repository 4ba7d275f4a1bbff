//! HTTP client types for Bitbucket API communication.
//!
//! This module provides the wire-level layer under the API core: request and
//! response values, transport errors, and the bundled reqwest transport.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpTransport`]: The async, `reqwest`-backed [`Transport`](crate::api::Transport)
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A raw response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`HttpError`]: Every transport failure
//!
//! # Example
//!
//! ```rust,ignore
//! use bitbucket_api::{BitbucketConfig, HttpMethod, HttpRequest, HttpTransport};
//!
//! let transport = HttpTransport::new(&BitbucketConfig::default())?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "repositories/alice/proj/commits")
//!     .query_param("page", "2")
//!     .build()
//!     .unwrap();
//!
//! let response = transport.send(&request).await?;
//! ```
//!
//! # Errors
//!
//! Non-2xx responses become [`HttpError::Response`]; Bitbucket's error
//! message is extracted from the body when present. Nothing is retried.

mod errors;
mod http_request;
mod http_response;
mod http_transport;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use http_transport::{HttpTransport, SDK_VERSION};
