//! Resource API objects and the [`Methods`] trait.
//!
//! An [`ApiObject`] pairs an [`AbstractApi`] with a static
//! [`ResourceDescriptor`]. Every declared endpoint becomes an invocable
//! method; [`Promised`] and [`Fluid`] wrap anything implementing [`Methods`],
//! so views compose freely.

use serde_json::Value;

use crate::api::{AbstractApi, ApiError, Args, Bound, Callback, Fluid, Promised, ResourceDescriptor};

/// Invocation of named API methods with the callback convention.
///
/// `invoke` returns synchronously only for validation failures; in that case
/// the callback is dropped without being called and nothing is dispatched.
/// Otherwise the callback fires exactly once with the request's outcome.
pub trait Methods: Send + Sync {
    /// The descriptor of the underlying resource.
    fn descriptor(&self) -> &'static ResourceDescriptor;

    /// Invokes `method` with `args`, delivering the outcome to `callback`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::UnknownMethod`] if the resource has no such method
    /// - [`ApiError::InvalidArguments`] if too few arguments are supplied
    /// - [`ApiError::InvalidPathSegment`] if a path argument is an array or object
    fn invoke(&self, method: &str, args: Args, callback: Callback) -> Result<(), ApiError>;

    /// Invokes `method` with a closure callback.
    ///
    /// # Errors
    ///
    /// Same as [`invoke`](Self::invoke).
    fn call<F>(&self, method: &str, args: Args, callback: F) -> Result<(), ApiError>
    where
        Self: Sized,
        F: FnOnce(Result<Value, ApiError>) + Send + 'static,
    {
        self.invoke(method, args, Box::new(callback))
    }

    /// Returns the names of every invocable method.
    fn method_names(&self) -> Vec<&'static str> {
        self.descriptor().method_names()
    }

    /// Returns a future-returning view over these methods.
    fn promised(&self) -> Promised<Self>
    where
        Self: Clone + Sized,
    {
        Promised::new(self.clone())
    }

    /// Returns a fluid view inserting fixed arguments at `position`.
    fn fluid(&self, position: usize) -> Fluid<Self>
    where
        Self: Clone + Sized,
    {
        Fluid::new(self.clone(), position)
    }
}

/// A resource API bound to a transport.
#[derive(Clone, Debug)]
pub struct ApiObject {
    base: AbstractApi,
    descriptor: &'static ResourceDescriptor,
}

// Verify ApiObject is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiObject>();
};

impl ApiObject {
    /// Creates the API object for `descriptor` over `base`.
    #[must_use]
    pub const fn new(base: AbstractApi, descriptor: &'static ResourceDescriptor) -> Self {
        Self { base, descriptor }
    }

    /// Returns the resource name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.descriptor.api_name
    }

    /// Returns the shared base object.
    #[must_use]
    pub const fn base(&self) -> &AbstractApi {
        &self.base
    }

    /// Binds a named fluid view declared by the resource.
    ///
    /// # Errors
    ///
    /// - [`ApiError::UnknownFluid`] if the resource declares no such view
    /// - [`ApiError::InvalidArguments`] if `args` does not hold exactly the
    ///   view's arity
    pub fn bind_fluid(&self, name: &str, args: Args) -> Result<Bound<Self>, ApiError> {
        let binding = self
            .descriptor
            .fluid(name)
            .ok_or_else(|| ApiError::UnknownFluid {
                resource: self.descriptor.api_name,
                fluid: name.to_string(),
            })?;
        if args.len() != binding.arity {
            return Err(ApiError::InvalidArguments {
                method: binding.name.to_string(),
                expected: binding.arity,
                actual: args.len(),
            });
        }
        Ok(self.fluid(binding.position).bind(args))
    }

    /// Binds `(username, repo_slug)` for every call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownFluid`] if the resource has no
    /// `for_project` view.
    pub fn for_project(
        &self,
        username: impl Into<String>,
        repo_slug: impl Into<String>,
    ) -> Result<Bound<Self>, ApiError> {
        let args = Args::from(vec![
            Value::String(username.into()),
            Value::String(repo_slug.into()),
        ]);
        self.bind_fluid("for_project", args)
    }

    /// Binds `(username, repo_slug, pr_id)` for every call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownFluid`] if the resource has no `for_pr`
    /// view.
    pub fn for_pr(
        &self,
        username: impl Into<String>,
        repo_slug: impl Into<String>,
        pr_id: u64,
    ) -> Result<Bound<Self>, ApiError> {
        let args = Args::from(vec![
            Value::String(username.into()),
            Value::String(repo_slug.into()),
            Value::from(pr_id),
        ]);
        self.bind_fluid("for_pr", args)
    }
}

impl Methods for ApiObject {
    fn descriptor(&self) -> &'static ResourceDescriptor {
        self.descriptor
    }

    fn invoke(&self, method: &str, args: Args, callback: Callback) -> Result<(), ApiError> {
        let endpoint = self
            .descriptor
            .endpoint(method)
            .ok_or_else(|| ApiError::UnknownMethod {
                resource: self.descriptor.api_name,
                method: method.to_string(),
            })?;
        let request = endpoint.request(self.descriptor.base, &args)?;
        self.base.dispatch(request, callback);
        Ok(())
    }
}
