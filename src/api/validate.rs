//! Argument-count validation.
//!
//! The callback is never part of [`Args`]: it is passed as its own
//! parameter, so the minimum only counts data arguments. Every method uses
//! the same rule.

use crate::api::{ApiError, Args};

/// Fails with [`ApiError::InvalidArguments`] when `args` holds fewer than
/// `minimum` entries.
///
/// # Errors
///
/// Returns [`ApiError::InvalidArguments`] carrying the method name and the
/// expected and actual counts.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::api::{validate_args, ApiError};
/// use bitbucket_api::args;
///
/// assert!(validate_args("get", &args!["alice", "proj", 42], 3).is_ok());
///
/// let error = validate_args("get", &args!["alice"], 3).unwrap_err();
/// assert!(matches!(error, ApiError::InvalidArguments { expected: 3, actual: 1, .. }));
/// ```
pub fn validate_args(method: &str, args: &Args, minimum: usize) -> Result<(), ApiError> {
    if args.len() < minimum {
        return Err(ApiError::InvalidArguments {
            method: method.to_string(),
            expected: minimum,
            actual: args.len(),
        });
    }
    Ok(())
}
