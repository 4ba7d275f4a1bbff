//! Request path construction from path segments.
//!
//! Segments are joined with `/`. `None` and empty segments are skipped.
//! Segment contents are not URL-encoded: identifiers such as workspace
//! names, repository slugs and commit hashes are already path-safe.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_api::api::uri::{build, UriBuilder};
//!
//! assert_eq!(build("repositories", [Some("alice"), Some("proj")]), "repositories/alice/proj");
//! assert_eq!(build("user", [None, Some("emails")]), "user/emails");
//!
//! let user = UriBuilder::new("user");
//! assert_eq!(user.build([Some("emails"), Some("a@b.c")]), "user/emails/a@b.c");
//! ```

/// Joins `base` and every present, non-empty segment with `/`.
#[must_use]
pub fn build<I, S>(base: &str, segments: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut path = String::new();
    push_segment(&mut path, base);
    for segment in segments.into_iter().flatten() {
        push_segment(&mut path, segment.as_ref());
    }
    path
}

fn push_segment(path: &mut String, segment: &str) {
    if segment.is_empty() {
        return;
    }
    if !path.is_empty() {
        path.push('/');
    }
    path.push_str(segment);
}

/// A URI builder bound to a resource base path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UriBuilder {
    base: String,
}

impl UriBuilder {
    /// Creates a builder for the given base segment.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Returns the base segment.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Builds a path below the base segment.
    #[must_use]
    pub fn build<I, S>(&self, segments: I) -> String
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        build(&self.base, segments)
    }
}
