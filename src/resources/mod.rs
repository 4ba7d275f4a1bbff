//! Bitbucket REST v2 resources.
//!
//! Each resource is a static [`ResourceDescriptor`] plus the serde models its
//! responses decode into.
//!
//! # Available Resources
//!
//! - [`user`] - The authenticated user and their email addresses
//! - [`commits`] - Repository commits
//! - [`pull_requests`] - Pull requests, their activity, comments and actions
//!
//! Shared nested types ([`common::Paginated`], [`common::BranchRef`], ...)
//! live in [`common`].

pub mod commits;
pub mod common;
pub mod pull_requests;
pub mod user;

use crate::api::ResourceDescriptor;

/// Every bundled resource descriptor.
pub static DESCRIPTORS: &[&ResourceDescriptor] = &[
    &user::DESCRIPTOR,
    &commits::DESCRIPTOR,
    &pull_requests::DESCRIPTOR,
];

/// Looks up a bundled resource by its API name.
#[must_use]
pub fn descriptor(api_name: &str) -> Option<&'static ResourceDescriptor> {
    DESCRIPTORS
        .iter()
        .copied()
        .find(|descriptor| descriptor.api_name == api_name)
}
