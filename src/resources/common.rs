//! Types embedded in several Bitbucket resources.
//!
//! These are not resources themselves; they appear as nested data inside
//! users, commits and pull requests.

use serde::{Deserialize, Serialize};

/// The page envelope wrapping every Bitbucket v2 collection response.
///
/// Only the page that was requested is decoded; following `next` is up to
/// the caller.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::resources::common::Paginated;
///
/// let page: Paginated<serde_json::Value> = serde_json::from_str(
///     r#"{"pagelen": 10, "page": 1, "values": [{}, {}], "next": "https://api.bitbucket.org/2.0/user/emails?page=2"}"#,
/// ).unwrap();
///
/// assert_eq!(page.values.len(), 2);
/// assert!(page.has_next());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Paginated<T> {
    /// Total number of objects across all pages, when Bitbucket reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// The 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    /// Page size used for this response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagelen: Option<u64>,
    /// Link to the next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Link to the previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    /// The objects on this page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

impl<T> Paginated<T> {
    /// Returns `true` if Bitbucket reported a next page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// A hyperlink object (`{"href": "..."}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Link {
    pub href: String,
}

/// A Bitbucket account as embedded in other objects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Account {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl Account {
    /// An account reference by UUID, as used for pull request reviewers.
    #[must_use]
    pub fn with_uuid(uuid: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            ..Self::default()
        }
    }
}

/// A commit reference carrying only the hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CommitRef {
    pub hash: String,
}

/// A branch name wrapper (`{"name": "..."}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Branch {
    pub name: String,
}

/// A repository reference as embedded in branch endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RepositoryRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// One end of a pull request: a branch, optionally pinned to a commit and
/// repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BranchRef {
    pub branch: Branch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<CommitRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<RepositoryRef>,
}

impl BranchRef {
    /// A reference to the branch called `name` in the same repository.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            branch: Branch { name: name.into() },
            ..Self::default()
        }
    }
}
