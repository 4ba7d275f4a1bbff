//! Repository commits resource.
//!
//! | method | HTTP | arguments | path |
//! |---|---|---|---|
//! | `get_all` | GET | `username`, `repo_slug` | `repositories/{username}/{repo_slug}/commits` |
//! | `get` | GET | `username`, `repo_slug`, `node` | `repositories/{username}/{repo_slug}/commit/{node}` |
//!
//! `node` is the commit hash. `get_all` answers with a
//! [`Paginated`](super::common::Paginated) page of [`Commit`]s.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ApiObject, ApiOptions, Endpoint, ResourceDescriptor, Transport};

use super::common::{Account, CommitRef, RepositoryRef};

/// Endpoint table for the commits resource.
pub static DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
    api_name: "commits",
    base: "repositories",
    methods: &[
        Endpoint::get(
            "get_all",
            &["username", "repo_slug"],
            "{username}/{repo_slug}/commits",
        ),
        Endpoint::get(
            "get",
            &["username", "repo_slug", "node"],
            "{username}/{repo_slug}/commit/{node}",
        ),
    ],
    fluids: &[],
};

/// Creates the commits API over `transport`.
#[must_use]
pub fn create_api(transport: Arc<dyn Transport>, options: ApiOptions) -> ApiObject {
    DESCRIPTOR.create_api(transport, options)
}

/// The author of a commit as recorded by git, plus the matched account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CommitAuthor {
    /// The raw `Name <email>` string from the commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// The Bitbucket account matched to the author, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Account>,
}

/// A repository commit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Commit {
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitAuthor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<CommitRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<RepositoryRef>,
}

impl Commit {
    /// Returns the first line of the commit message.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.message.as_deref().and_then(|m| m.lines().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::resources::common::Paginated;

    #[test]
    fn test_commit_paths() {
        let get_all = DESCRIPTOR.endpoint("get_all").unwrap();
        assert_eq!(
            get_all
                .request(DESCRIPTOR.base, &args!["alice", "proj"])
                .unwrap()
                .path,
            "repositories/alice/proj/commits"
        );

        let get = DESCRIPTOR.endpoint("get").unwrap();
        assert_eq!(
            get.request(DESCRIPTOR.base, &args!["alice", "proj", "9fa3b1c"])
                .unwrap()
                .path,
            "repositories/alice/proj/commit/9fa3b1c"
        );
    }

    #[test]
    fn test_get_requires_node() {
        let get = DESCRIPTOR.endpoint("get").unwrap();
        assert!(get.request(DESCRIPTOR.base, &args!["alice", "proj"]).is_err());
    }

    #[test]
    fn test_commit_page_deserialization() {
        let json_str = concat!(
            r#"{"pagelen":30,"values":[{"hash":"9fa3b1c","#,
            r#""message":"Fix login redirect\n\nCloses #12","#,
            r#""date":"2024-02-01T09:15:00+00:00","#,
            r#""author":{"raw":"Alice <alice@example.com>","user":{"display_name":"Alice"}},"#,
            r#""parents":[{"hash":"77c0d2e"}]}]}"#
        );

        let page: Paginated<Commit> = serde_json::from_str(json_str).unwrap();
        let commit = &page.values[0];

        assert_eq!(commit.hash, "9fa3b1c");
        assert_eq!(commit.summary(), Some("Fix login redirect"));
        assert_eq!(commit.parents[0].hash, "77c0d2e");
        assert_eq!(
            commit.author.as_ref().and_then(|a| a.raw.as_deref()),
            Some("Alice <alice@example.com>")
        );
    }
}
