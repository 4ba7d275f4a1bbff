//! Positional arguments for API method calls.
//!
//! Each argument is a [`serde_json::Value`]. Strings, numbers and booleans
//! render as path segments, `null` renders as a skipped segment, and objects
//! are used as request bodies.

use serde::Serialize;

use crate::api::ApiError;

/// A single positional argument.
pub type Arg = serde_json::Value;

/// Builds an [`Args`] list from expressions convertible into [`Arg`].
///
/// # Example
///
/// ```rust
/// use bitbucket_api::args;
///
/// let args = args!["alice", "proj", 42];
/// assert_eq!(args.len(), 3);
/// assert_eq!(args.get(2), Some(&serde_json::json!(42)));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::api::Args::new()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::api::Args::from(::std::vec![$($crate::api::Arg::from($arg)),+])
    };
}

/// Serializes a model into an argument, e.g. a pull request body.
///
/// # Errors
///
/// Returns [`ApiError::Json`] if `value` cannot be represented as JSON.
pub fn to_arg<T: Serialize>(value: &T) -> Result<Arg, ApiError> {
    Ok(serde_json::to_value(value)?)
}

/// An ordered list of positional arguments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args(Vec<Arg>);

impl Args {
    /// Creates an empty argument list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the argument at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arg> {
        self.0.get(index)
    }

    /// Appends an argument.
    pub fn push(&mut self, arg: impl Into<Arg>) {
        self.0.push(arg.into());
    }

    /// Returns an iterator over the arguments.
    pub fn iter(&self) -> std::slice::Iter<'_, Arg> {
        self.0.iter()
    }

    /// Returns a new list with `fixed` inserted at `position`.
    ///
    /// A position past the end appends.
    #[must_use]
    pub fn with_inserted(mut self, position: usize, fixed: &Self) -> Self {
        let at = position.min(self.0.len());
        self.0.splice(at..at, fixed.0.iter().cloned());
        self
    }
}

impl From<Vec<Arg>> for Args {
    fn from(args: Vec<Arg>) -> Self {
        Self(args)
    }
}

impl FromIterator<Arg> for Args {
    fn from_iter<I: IntoIterator<Item = Arg>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Args {
    type Item = Arg;
    type IntoIter = std::vec::IntoIter<Arg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a Arg;
    type IntoIter = std::slice::Iter<'a, Arg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
