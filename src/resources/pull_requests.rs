//! Pull requests resource.
//!
//! Every method takes `username` and `repo_slug` first; most then take the
//! pull request id. Paths are under
//! `repositories/{username}/{repo_slug}/pullrequests`.
//!
//! | method | HTTP | extra arguments | path suffix | body |
//! |---|---|---|---|---|
//! | `get_all` | GET | | | |
//! | `get` | GET | `pr_id` | `/{pr_id}` | |
//! | `create` | POST | `pull_request` | | `{"_body": pull_request}` |
//! | `all_activity` | GET | | `/activity` | |
//! | `get_activity` | GET | `pr_id` | `/{pr_id}/activity` | |
//! | `approve` | POST | `pr_id` | `/{pr_id}/approve` | |
//! | `disapprove` | DELETE | `pr_id` | `/{pr_id}/approve` | |
//! | `get_comments` | GET | `pr_id` | `/{pr_id}/comments` | |
//! | `get_comment` | GET | `pr_id`, `comment_id` | `/{pr_id}/comments/{comment_id}` | |
//! | `get_commits` | GET | `pr_id` | `/{pr_id}/commits` | |
//! | `decline` | POST | `pr_id` | `/{pr_id}/decline` | |
//! | `get_diff` | GET | `pr_id` | `/{pr_id}/diff` | |
//! | `merge` | POST | `pr_id` | `/{pr_id}/merge` | |
//! | `patch` | GET | `pr_id` | `/{pr_id}/patch` | |
//! | `statuses` | GET | `pr_id` | `/{pr_id}/statuses` | |
//! | `modify` | PUT | `pr_id`, `data` | `/{pr_id}` | `data` |
//!
//! `get_diff` and `patch` answer with plain text, delivered as a JSON string.
//!
//! # Fluid Views
//!
//! - `for_project(username, repo_slug)` binds the first two arguments
//! - `for_pr(username, repo_slug, pr_id)` binds the first three
//!
//! ```rust
//! use std::sync::Arc;
//! use bitbucket_api::api::mock::MockTransport;
//! use bitbucket_api::api::{ApiOptions, Methods};
//! use bitbucket_api::{args, resources::pull_requests};
//!
//! let transport = Arc::new(MockTransport::new());
//! let api = pull_requests::create_api(transport.clone(), ApiOptions::default());
//!
//! let pr = api.for_pr("alice", "proj", 7).unwrap();
//! pr.call("get_comment", args![1001], |_| {}).unwrap();
//!
//! assert_eq!(
//!     transport.last_request().unwrap().path,
//!     "repositories/alice/proj/pullrequests/7/comments/1001"
//! );
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    ApiObject, ApiOptions, BodySource, Endpoint, FluidSpec, ResourceDescriptor, Transport,
};

use super::common::{Account, BranchRef, CommitRef, Link};

const PROJECT: &[&str] = &["username", "repo_slug"];
const PR: &[&str] = &["username", "repo_slug", "pr_id"];

/// Endpoint table for the pull requests resource.
pub static DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
    api_name: "pull_requests",
    base: "repositories",
    methods: &[
        Endpoint::get("get_all", PROJECT, "{username}/{repo_slug}/pullrequests"),
        Endpoint::get("get", PR, "{username}/{repo_slug}/pullrequests/{pr_id}"),
        Endpoint::post(
            "create",
            &["username", "repo_slug", "pull_request"],
            "{username}/{repo_slug}/pullrequests",
        )
        .with_body(BodySource::Wrapped("pull_request")),
        Endpoint::get(
            "all_activity",
            PROJECT,
            "{username}/{repo_slug}/pullrequests/activity",
        ),
        Endpoint::get(
            "get_activity",
            PR,
            "{username}/{repo_slug}/pullrequests/{pr_id}/activity",
        ),
        Endpoint::post(
            "approve",
            PR,
            "{username}/{repo_slug}/pullrequests/{pr_id}/approve",
        ),
        Endpoint::delete(
            "disapprove",
            PR,
            "{username}/{repo_slug}/pullrequests/{pr_id}/approve",
        ),
        Endpoint::get(
            "get_comments",
            PR,
            "{username}/{repo_slug}/pullrequests/{pr_id}/comments",
        ),
        Endpoint::get(
            "get_comment",
            &["username", "repo_slug", "pr_id", "comment_id"],
            "{username}/{repo_slug}/pullrequests/{pr_id}/comments/{comment_id}",
        ),
        Endpoint::get(
            "get_commits",
            PR,
            "{username}/{repo_slug}/pullrequests/{pr_id}/commits",
        ),
        Endpoint::post(
            "decline",
            PR,
            "{username}/{repo_slug}/pullrequests/{pr_id}/decline",
        ),
        Endpoint::get(
            "get_diff",
            PR,
            "{username}/{repo_slug}/pullrequests/{pr_id}/diff",
        ),
        Endpoint::post(
            "merge",
            PR,
            "{username}/{repo_slug}/pullrequests/{pr_id}/merge",
        ),
        // Bitbucket serves the patch over GET only
        Endpoint::get(
            "patch",
            PR,
            "{username}/{repo_slug}/pullrequests/{pr_id}/patch",
        ),
        Endpoint::get(
            "statuses",
            PR,
            "{username}/{repo_slug}/pullrequests/{pr_id}/statuses",
        ),
        Endpoint::put(
            "modify",
            &["username", "repo_slug", "pr_id", "data"],
            "{username}/{repo_slug}/pullrequests/{pr_id}",
        )
        .with_body(BodySource::Raw("data")),
    ],
    fluids: &[FluidSpec::FOR_PROJECT, FluidSpec::FOR_PR],
};

/// Creates the pull requests API over `transport`.
#[must_use]
pub fn create_api(transport: Arc<dyn Transport>, options: ApiOptions) -> ApiObject {
    DESCRIPTOR.create_api(transport, options)
}

/// The state of a pull request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestState {
    #[default]
    Open,
    Merged,
    Declined,
    Superseded,
}

/// Links attached to a pull request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PullRequestLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<Link>,
}

/// A pull request as returned by `get` and `get_all`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PullRequest {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub state: PullRequestState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Account>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<BranchRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<BranchRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_commit: Option<CommitRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_source_branch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PullRequestLinks>,
}

/// The body of a `create` call.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::resources::common::BranchRef;
/// use bitbucket_api::resources::pull_requests::NewPullRequest;
///
/// let pr = NewPullRequest::new("Fix login redirect", BranchRef::named("fix/login"))
///     .destination(BranchRef::named("main"))
///     .close_source_branch(true);
///
/// let body = serde_json::to_value(&pr).unwrap();
/// assert_eq!(body["source"]["branch"]["name"], "fix/login");
/// assert_eq!(body["destination"]["branch"]["name"], "main");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NewPullRequest {
    pub title: String,
    pub source: BranchRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<BranchRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_source_branch: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviewers: Vec<Account>,
}

impl NewPullRequest {
    /// A pull request from `source` into the repository's main branch.
    #[must_use]
    pub fn new(title: impl Into<String>, source: BranchRef) -> Self {
        Self {
            title: title.into(),
            source,
            ..Self::default()
        }
    }

    /// Sets the target branch.
    #[must_use]
    pub fn destination(mut self, destination: BranchRef) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Deletes the source branch after merge.
    #[must_use]
    pub const fn close_source_branch(mut self, close: bool) -> Self {
        self.close_source_branch = Some(close);
        self
    }

    /// Adds a reviewer.
    #[must_use]
    pub fn reviewer(mut self, reviewer: Account) -> Self {
        self.reviewers.push(reviewer);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Args;
    use crate::args;
    use crate::clients::HttpMethod;
    use serde_json::json;

    fn request(method: &str, args: &Args) -> crate::clients::HttpRequest {
        DESCRIPTOR
            .endpoint(method)
            .unwrap()
            .request(DESCRIPTOR.base, args)
            .unwrap()
    }

    #[test]
    fn test_every_method_is_declared_once() {
        let names = DESCRIPTOR.method_names();
        assert_eq!(
            names,
            vec![
                "get_all",
                "get",
                "create",
                "all_activity",
                "get_activity",
                "approve",
                "disapprove",
                "get_comments",
                "get_comment",
                "get_commits",
                "decline",
                "get_diff",
                "merge",
                "patch",
                "statuses",
                "modify",
            ]
        );
    }

    #[test]
    fn test_get_path() {
        let request = request("get", &args!["alice", "proj", 42]);
        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "repositories/alice/proj/pullrequests/42");
    }

    #[test]
    fn test_create_wraps_body() {
        let request = request("create", &args!["alice", "proj", json!({"title": "T"})]);
        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(request.path, "repositories/alice/proj/pullrequests");
        assert_eq!(request.body, Some(json!({"_body": {"title": "T"}})));
    }

    #[test]
    fn test_approve_and_disapprove_share_path() {
        let approve = request("approve", &args!["alice", "proj", 5]);
        let disapprove = request("disapprove", &args!["alice", "proj", 5]);

        assert_eq!(approve.http_method, HttpMethod::Post);
        assert_eq!(disapprove.http_method, HttpMethod::Delete);
        assert_eq!(approve.path, "repositories/alice/proj/pullrequests/5/approve");
        assert_eq!(approve.path, disapprove.path);
    }

    #[test]
    fn test_action_paths() {
        for (method, suffix, verb) in [
            ("get_activity", "activity", HttpMethod::Get),
            ("get_comments", "comments", HttpMethod::Get),
            ("get_commits", "commits", HttpMethod::Get),
            ("decline", "decline", HttpMethod::Post),
            ("get_diff", "diff", HttpMethod::Get),
            ("merge", "merge", HttpMethod::Post),
            ("patch", "patch", HttpMethod::Get),
            ("statuses", "statuses", HttpMethod::Get),
        ] {
            let request = request(method, &args!["alice", "proj", 9]);
            assert_eq!(request.http_method, verb, "{method}");
            assert_eq!(
                request.path,
                format!("repositories/alice/proj/pullrequests/9/{suffix}")
            );
        }
    }

    #[test]
    fn test_all_activity_is_repository_wide() {
        let request = request("all_activity", &args!["alice", "proj"]);
        assert_eq!(request.path, "repositories/alice/proj/pullrequests/activity");
    }

    #[test]
    fn test_modify_sends_data_as_is() {
        let request = request("modify", &args!["alice", "proj", 3, json!({"title": "New"})]);
        assert_eq!(request.http_method, HttpMethod::Put);
        assert_eq!(request.path, "repositories/alice/proj/pullrequests/3");
        assert_eq!(request.body, Some(json!({"title": "New"})));
    }

    #[test]
    fn test_declares_project_and_pr_fluids() {
        assert_eq!(DESCRIPTOR.fluid("for_project"), Some(&FluidSpec::FOR_PROJECT));
        assert_eq!(DESCRIPTOR.fluid("for_pr"), Some(&FluidSpec::FOR_PR));
    }

    #[test]
    fn test_pull_request_deserialization() {
        let json_str = concat!(
            r#"{"id":42,"title":"Fix login redirect","state":"MERGED","#,
            r#""author":{"display_name":"Alice"},"#,
            r#""source":{"branch":{"name":"fix/login"},"commit":{"hash":"9fa3b1c"}},"#,
            r#""destination":{"branch":{"name":"main"}},"#,
            r#""comment_count":2,"created_on":"2024-02-01T09:15:00.000000+00:00"}"#
        );

        let pr: PullRequest = serde_json::from_str(json_str).unwrap();

        assert_eq!(pr.id, 42);
        assert_eq!(pr.state, PullRequestState::Merged);
        assert_eq!(pr.source.unwrap().branch.name, "fix/login");
        assert_eq!(pr.comment_count, Some(2));
        assert!(pr.created_on.is_some());
    }

    #[test]
    fn test_new_pull_request_serialization() {
        let pr = NewPullRequest::new("Add CI", BranchRef::named("ci"))
            .description("Runs tests on push")
            .reviewer(Account::with_uuid("{42}"));

        let value = serde_json::to_value(&pr).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Add CI",
                "source": {"branch": {"name": "ci"}},
                "description": "Runs tests on push",
                "reviewers": [{"uuid": "{42}"}]
            })
        );
    }
}
