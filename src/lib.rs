//! # Bitbucket API Rust Client
//!
//! A Rust client for the Bitbucket REST API (v2), exposing each resource as a
//! set of named methods callable with a callback or as futures.
//!
//! ## Overview
//!
//! This crate provides:
//! - Declarative endpoint tables per resource via [`api::ResourceDescriptor`]
//! - Argument validation before any request is sent
//! - One-shot listeners normalizing transport outcomes into a single callback
//! - A future-based view over any method set via [`api::Promised`]
//! - Partial application of fixed arguments via [`api::Fluid`]
//! - A pluggable [`api::Transport`] with a bundled `reqwest` implementation
//! - Serde models for users, commits and pull requests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bitbucket_api::{args, Bitbucket, BitbucketConfig};
//! use bitbucket_api::resources::pull_requests::PullRequest;
//! use bitbucket_api::api::Methods;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BitbucketConfig::builder()
//!     .user_agent_prefix("release-bot/1.0")
//!     .build()?;
//! let bitbucket = Bitbucket::from_config(&config)?;
//!
//! let pulls = bitbucket.pull_requests().promised();
//! let pr: PullRequest = pulls.call_as("get", args!["alice", "proj", 42]).await?;
//! println!("#{} {}", pr.id, pr.title);
//! # Ok(())
//! # }
//! ```
//!
//! ## Callbacks
//!
//! ```rust,ignore
//! bitbucket
//!     .pull_requests()
//!     .call("approve", args!["alice", "proj", 5], |result| match result {
//!         Ok(body) => println!("approved: {body}"),
//!         Err(e) => eprintln!("approve failed: {e}"),
//!     })?;
//! ```
//!
//! Validation failures are returned synchronously and the callback is never
//! called. Otherwise the callback fires exactly once.
//!
//! ## Fluid Views
//!
//! ```rust,ignore
//! let pr = bitbucket.pull_requests().for_pr("alice", "proj", 42)?;
//! let comments = pr.promised().call("get_comments", args![]).await?;
//! let diff = pr.promised().call("get_diff", args![]).await?;
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (dispatch at `debug`, duplicate listener
//! notifications at `warn`) and installs no subscriber.

pub mod api;
mod bitbucket;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

pub use bitbucket::Bitbucket;

// Re-export public types at crate root for convenience
pub use api::{ApiError, ApiObject, ApiOptions, Args, Methods, Transport};
pub use config::{BitbucketConfig, BitbucketConfigBuilder, HostUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse, HttpResponseError,
    HttpTransport, InvalidHttpRequestError,
};
