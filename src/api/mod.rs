//! The generic API core.
//!
//! Resource families are declared as data ([`ResourceDescriptor`] tables of
//! [`Endpoint`]s) and turned into invocable objects by this module.
//!
//! # Overview
//!
//! - [`uri`]: joins a base segment with optional path segments
//! - [`validate_args`]: the minimum-argument rule shared by every method
//! - [`AbstractApi`]: shared transport, options and the listener factory
//! - [`Listener`]: one-shot adapter from transport outcomes to callbacks
//! - [`ApiObject`] and [`Methods`]: the callback calling convention
//! - [`Promised`]: the future calling convention over any [`Methods`]
//! - [`Fluid`] and [`Bound`]: fixed-argument views over any [`Methods`]
//! - [`mock::MockTransport`]: an in-memory transport for tests
//!
//! # Calling Conventions
//!
//! ```rust
//! use std::sync::Arc;
//! use bitbucket_api::api::mock::MockTransport;
//! use bitbucket_api::api::{ApiOptions, Methods};
//! use bitbucket_api::{args, resources};
//!
//! let transport = Arc::new(MockTransport::new());
//! let pulls = resources::pull_requests::create_api(transport.clone(), ApiOptions::default());
//!
//! // Callback style
//! pulls.call("approve", args!["alice", "proj", 5], |_| {}).unwrap();
//!
//! // Bound style: ("alice", "proj") fixed, only the pull request id remains
//! let project = pulls.for_project("alice", "proj").unwrap();
//! project.call("decline", args![5], |_| {}).unwrap();
//!
//! let paths: Vec<_> = transport.requests().into_iter().map(|r| r.path).collect();
//! assert_eq!(paths, vec![
//!     "repositories/alice/proj/pullrequests/5/approve",
//!     "repositories/alice/proj/pullrequests/5/decline",
//! ]);
//! ```

mod abstract_api;
mod args;
mod endpoint;
mod errors;
mod fluid;
mod listener;
pub mod mock;
mod object;
mod promised;
mod transport;
pub mod uri;
mod validate;

pub use abstract_api::{AbstractApi, ApiOptions};
pub use args::{to_arg, Arg, Args};
pub use endpoint::{BodySource, Endpoint, FluidSpec, ResourceDescriptor};
pub use errors::ApiError;
pub use fluid::{Bound, Fluid};
pub use listener::{normalize_body, Callback, Listener};
pub use object::{ApiObject, Methods};
pub use promised::Promised;
pub use transport::Transport;
pub use validate::validate_args;
