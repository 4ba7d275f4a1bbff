//! Argument binding views.
//!
//! A [`Fluid`] remembers an insertion position; [`Fluid::bind`] captures a
//! fixed argument list and returns a [`Bound`] view. Calling a method on the
//! view inserts the fixed arguments at the position before delegating, so
//! `bound.call("get", args![42], cb)` with `("alice", "proj")` bound at `0`
//! reaches the resource as `get("alice", "proj", 42)`.
//!
//! Each `bind` produces an independent view; views never share state.

use crate::api::{ApiError, Args, Callback, Methods, ResourceDescriptor};

/// A binder for a methods provider at a fixed insertion position.
#[derive(Clone, Debug)]
pub struct Fluid<M> {
    methods: M,
    position: usize,
}

impl<M: Methods + Clone> Fluid<M> {
    /// Creates a binder inserting at `position`.
    #[must_use]
    pub const fn new(methods: M, position: usize) -> Self {
        Self { methods, position }
    }

    /// Returns the insertion position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns a view with `fixed` bound at the insertion position.
    #[must_use]
    pub fn bind(&self, fixed: Args) -> Bound<M> {
        tracing::debug!(
            "Binding {} argument(s) at position {} for {}",
            fixed.len(),
            self.position,
            self.methods.descriptor().api_name
        );
        Bound {
            methods: self.methods.clone(),
            position: self.position,
            fixed,
        }
    }
}

/// A methods provider with arguments bound at a position.
///
/// `Bound` implements [`Methods`] itself, so it can be made promised or
/// bound again.
#[derive(Clone, Debug)]
pub struct Bound<M> {
    methods: M,
    position: usize,
    fixed: Args,
}

impl<M> Bound<M> {
    /// Returns the bound arguments.
    #[must_use]
    pub const fn fixed_args(&self) -> &Args {
        &self.fixed
    }

    /// Returns the insertion position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the wrapped provider.
    #[must_use]
    pub const fn inner(&self) -> &M {
        &self.methods
    }
}

impl<M: Methods> Methods for Bound<M> {
    fn descriptor(&self) -> &'static ResourceDescriptor {
        self.methods.descriptor()
    }

    fn invoke(&self, method: &str, args: Args, callback: Callback) -> Result<(), ApiError> {
        // the caller must fill every slot before the bound ones
        if args.len() < self.position {
            return Err(ApiError::InvalidArguments {
                method: method.to_string(),
                expected: self.position,
                actual: args.len(),
            });
        }
        let args = args.with_inserted(self.position, &self.fixed);
        self.methods.invoke(method, args, callback)
    }
}
