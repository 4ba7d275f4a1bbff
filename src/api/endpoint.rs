//! Declarative endpoint and resource descriptions.
//!
//! Each API method is declared once as an [`Endpoint`]: its name, HTTP
//! method, ordered required parameters, path template and body source.
//! Both the callback and the future calling conventions are derived from
//! that single description.
//!
//! # Path Templates
//!
//! Templates are `/`-separated and relative to the resource base segment.
//! `{name}` placeholders are replaced by the positional argument declared
//! under that name:
//!
//! ```rust
//! use bitbucket_api::api::Endpoint;
//! use bitbucket_api::args;
//!
//! const GET: Endpoint = Endpoint::get(
//!     "get",
//!     &["username", "repo_slug", "pr_id"],
//!     "{username}/{repo_slug}/pullrequests/{pr_id}",
//! );
//!
//! let request = GET.request("repositories", &args!["alice", "proj", 42]).unwrap();
//! assert_eq!(request.path, "repositories/alice/proj/pullrequests/42");
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::api::{uri, validate_args, AbstractApi, ApiError, ApiObject, ApiOptions, Args, Transport};
use crate::clients::{HttpError, HttpMethod, HttpRequest};

/// Where an endpoint's request body comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodySource {
    /// No request body.
    Empty,
    /// The named argument wrapped as `{"_body": <arg>}`.
    Wrapped(&'static str),
    /// The named argument sent as-is. A `null` argument sends no body.
    Raw(&'static str),
}

/// A single API method description.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// The method name callers invoke.
    pub name: &'static str,
    /// The HTTP method used.
    pub http_method: HttpMethod,
    /// Required positional parameters, in order.
    pub params: &'static [&'static str],
    /// Path template relative to the resource base segment.
    pub template: &'static str,
    /// Request body source.
    pub body: BodySource,
}

impl Endpoint {
    /// Creates a body-less endpoint.
    #[must_use]
    pub const fn new(
        name: &'static str,
        http_method: HttpMethod,
        params: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            name,
            http_method,
            params,
            template,
            body: BodySource::Empty,
        }
    }

    /// Creates a GET endpoint.
    #[must_use]
    pub const fn get(
        name: &'static str,
        params: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self::new(name, HttpMethod::Get, params, template)
    }

    /// Creates a POST endpoint.
    #[must_use]
    pub const fn post(
        name: &'static str,
        params: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self::new(name, HttpMethod::Post, params, template)
    }

    /// Creates a PUT endpoint.
    #[must_use]
    pub const fn put(
        name: &'static str,
        params: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self::new(name, HttpMethod::Put, params, template)
    }

    /// Creates a DELETE endpoint.
    #[must_use]
    pub const fn delete(
        name: &'static str,
        params: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self::new(name, HttpMethod::Delete, params, template)
    }

    /// Sets the body source.
    #[must_use]
    pub const fn with_body(self, body: BodySource) -> Self {
        Self {
            name: self.name,
            http_method: self.http_method,
            params: self.params,
            template: self.template,
            body,
        }
    }

    /// Returns the minimum number of positional arguments.
    #[must_use]
    pub const fn min_args(&self) -> usize {
        self.params.len()
    }

    /// Validates `args` and builds the request for this endpoint under `base`.
    ///
    /// Arguments past the declared parameters are ignored.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidArguments`] if fewer than [`min_args`](Self::min_args)
    ///   arguments are supplied
    /// - [`ApiError::InvalidPathSegment`] if a path argument is an array or object
    /// - [`ApiError::Adapter`] if the template names an undeclared parameter
    pub fn request(&self, base: &str, args: &Args) -> Result<HttpRequest, ApiError> {
        validate_args(self.name, args, self.min_args())?;

        let segments = self
            .template
            .split('/')
            .map(|part| {
                match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                    Some(param) => self.path_segment(param, args),
                    None => Ok(Some(part.to_string())),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        let path = uri::build(base, segments);

        let body = match self.body {
            BodySource::Empty => None,
            BodySource::Wrapped(param) => {
                let mut wrapper = serde_json::Map::new();
                wrapper.insert("_body".to_string(), self.argument(param, args)?.clone());
                Some(Value::Object(wrapper))
            }
            BodySource::Raw(param) => match self.argument(param, args)? {
                Value::Null => None,
                value => Some(value.clone()),
            },
        };

        let request = HttpRequest::builder(self.http_method, path)
            .maybe_body(body)
            .build()
            .map_err(HttpError::from)?;
        Ok(request)
    }

    fn argument<'a>(&self, param: &str, args: &'a Args) -> Result<&'a Value, ApiError> {
        let index = self
            .params
            .iter()
            .position(|p| *p == param)
            .ok_or_else(|| {
                ApiError::Adapter(format!(
                    "{} refers to undeclared parameter '{param}'",
                    self.name
                ))
            })?;
        // validate_args guarantees the index is in range
        args.get(index).ok_or_else(|| ApiError::InvalidArguments {
            method: self.name.to_string(),
            expected: self.min_args(),
            actual: args.len(),
        })
    }

    fn path_segment(&self, param: &'static str, args: &Args) -> Result<Option<String>, ApiError> {
        match self.argument(param, args)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            Value::Array(_) | Value::Object(_) => Err(ApiError::InvalidPathSegment {
                method: self.name,
                param,
            }),
        }
    }
}

/// A named fluid view: `arity` arguments bound at `position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FluidSpec {
    /// The view name.
    pub name: &'static str,
    /// Where the bound arguments are inserted.
    pub position: usize,
    /// How many arguments the view binds.
    pub arity: usize,
}

impl FluidSpec {
    /// Binds `(username, repo_slug)`.
    pub const FOR_PROJECT: Self = Self::new("for_project", 0, 2);
    /// Binds `(username, repo_slug, pr_id)`.
    pub const FOR_PR: Self = Self::new("for_pr", 0, 3);

    /// Creates a fluid view description.
    #[must_use]
    pub const fn new(name: &'static str, position: usize, arity: usize) -> Self {
        Self {
            name,
            position,
            arity,
        }
    }
}

/// Static metadata for one resource family.
#[derive(Debug)]
pub struct ResourceDescriptor {
    /// The resource name, e.g. `"pullrequests"`.
    pub api_name: &'static str,
    /// The base path segment every method path starts with.
    pub base: &'static str,
    /// The resource's methods.
    pub methods: &'static [Endpoint],
    /// Fluid views the resource offers.
    pub fluids: &'static [FluidSpec],
}

impl ResourceDescriptor {
    /// Looks up a method by name.
    #[must_use]
    pub fn endpoint(&self, name: &str) -> Option<&'static Endpoint> {
        self.methods.iter().find(|endpoint| endpoint.name == name)
    }

    /// Returns the names of all methods, in declaration order.
    #[must_use]
    pub fn method_names(&self) -> Vec<&'static str> {
        self.methods.iter().map(|endpoint| endpoint.name).collect()
    }

    /// Looks up a fluid view by name.
    #[must_use]
    pub fn fluid(&self, name: &str) -> Option<&'static FluidSpec> {
        self.fluids.iter().find(|fluid| fluid.name == name)
    }

    /// Creates an API object for this resource over `transport`.
    #[must_use]
    pub fn create_api(&'static self, transport: Arc<dyn Transport>, options: ApiOptions) -> ApiObject {
        ApiObject::new(AbstractApi::new(transport, options), self)
    }
}
