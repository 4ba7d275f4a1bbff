//! The client root: one transport, every resource.

use std::sync::Arc;

use crate::api::{AbstractApi, ApiError, ApiObject, ApiOptions, ResourceDescriptor, Transport};
use crate::clients::{HttpError, HttpTransport};
use crate::config::BitbucketConfig;
use crate::resources;

/// Entry point exposing each Bitbucket resource as an [`ApiObject`].
///
/// All resources share the same transport and options.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use bitbucket_api::api::mock::MockTransport;
/// use bitbucket_api::api::{ApiOptions, Methods};
/// use bitbucket_api::{args, Bitbucket};
///
/// let transport = Arc::new(MockTransport::new());
/// let bitbucket = Bitbucket::new(transport.clone(), ApiOptions::default());
///
/// bitbucket.user().call("get_emails", args![], |_| {}).unwrap();
/// assert_eq!(transport.last_request().unwrap().path, "user/emails");
/// ```
#[derive(Clone, Debug)]
pub struct Bitbucket {
    base: AbstractApi,
}

// Verify Bitbucket is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Bitbucket>();
};

impl Bitbucket {
    /// Creates a client over any transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, options: ApiOptions) -> Self {
        Self {
            base: AbstractApi::new(transport, options),
        }
    }

    /// Creates a client over the bundled [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn from_config(config: &BitbucketConfig) -> Result<Self, HttpError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), ApiOptions::default()))
    }

    /// Returns the shared base object.
    #[must_use]
    pub const fn base(&self) -> &AbstractApi {
        &self.base
    }

    /// The user resource.
    #[must_use]
    pub fn user(&self) -> ApiObject {
        self.api(&resources::user::DESCRIPTOR)
    }

    /// The commits resource.
    #[must_use]
    pub fn commits(&self) -> ApiObject {
        self.api(&resources::commits::DESCRIPTOR)
    }

    /// The pull requests resource.
    #[must_use]
    pub fn pull_requests(&self) -> ApiObject {
        self.api(&resources::pull_requests::DESCRIPTOR)
    }

    /// Looks up a resource by API name (`"user"`, `"commits"`, `"pull_requests"`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownResource`] if no resource has that name.
    pub fn resource(&self, api_name: &str) -> Result<ApiObject, ApiError> {
        resources::descriptor(api_name)
            .map(|descriptor| self.api(descriptor))
            .ok_or_else(|| ApiError::UnknownResource {
                name: api_name.to_string(),
            })
    }

    /// Returns every bundled resource descriptor.
    #[must_use]
    pub fn descriptors(&self) -> &'static [&'static ResourceDescriptor] {
        resources::DESCRIPTORS
    }

    fn api(&self, descriptor: &'static ResourceDescriptor) -> ApiObject {
        ApiObject::new(self.base.clone(), descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Methods;
    use crate::args;

    fn bitbucket() -> (Bitbucket, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        (
            Bitbucket::new(transport.clone(), ApiOptions::default()),
            transport,
        )
    }

    #[test]
    fn test_resources_share_transport() {
        let (bitbucket, transport) = bitbucket();

        bitbucket.user().call("get", args![], |_| {}).unwrap();
        bitbucket
            .commits()
            .call("get_all", args!["alice", "proj"], |_| {})
            .unwrap();

        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn test_resource_by_name() {
        let (bitbucket, _) = bitbucket();

        assert_eq!(bitbucket.resource("pull_requests").unwrap().name(), "pull_requests");
        assert!(matches!(
            bitbucket.resource("wiki"),
            Err(ApiError::UnknownResource { .. })
        ));
    }

    #[test]
    fn test_descriptors_lists_every_resource() {
        let (bitbucket, _) = bitbucket();
        let names: Vec<_> = bitbucket.descriptors().iter().map(|d| d.api_name).collect();
        assert_eq!(names, vec!["user", "commits", "pull_requests"]);
    }

    #[test]
    fn test_from_config_builds_http_transport() {
        let bitbucket = Bitbucket::from_config(&BitbucketConfig::default()).unwrap();
        assert_eq!(bitbucket.pull_requests().name(), "pull_requests");
    }
}
