//! User resource: the authenticated account and its email addresses.
//!
//! | method | HTTP | arguments | path |
//! |---|---|---|---|
//! | `get` | GET | | `user` |
//! | `get_emails` | GET | | `user/emails` |
//! | `get_email_details` | GET | `email` | `user/emails/{email}` |

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ApiObject, ApiOptions, Endpoint, ResourceDescriptor, Transport};

use super::common::Link;

/// Endpoint table for the user resource.
pub static DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
    api_name: "user",
    base: "user",
    methods: &[
        Endpoint::get("get", &[], ""),
        Endpoint::get("get_emails", &[], "emails"),
        Endpoint::get("get_email_details", &["email"], "emails/{email}"),
    ],
    fluids: &[],
};

/// Creates the user API over `transport`.
#[must_use]
pub fn create_api(transport: Arc<dyn Transport>, options: ApiOptions) -> ApiObject {
    DESCRIPTOR.create_api(transport, options)
}

/// Links attached to a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UserLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Link>,
}

/// The authenticated Bitbucket user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<UserLinks>,
}

/// An email address registered to the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Email {
    pub email: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub is_confirmed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[test]
    fn test_user_paths() {
        let get = DESCRIPTOR.endpoint("get").unwrap();
        assert_eq!(get.request(DESCRIPTOR.base, &args![]).unwrap().path, "user");

        let emails = DESCRIPTOR.endpoint("get_emails").unwrap();
        assert_eq!(
            emails.request(DESCRIPTOR.base, &args![]).unwrap().path,
            "user/emails"
        );

        let details = DESCRIPTOR.endpoint("get_email_details").unwrap();
        assert_eq!(
            details
                .request(DESCRIPTOR.base, &args!["alice@example.com"])
                .unwrap()
                .path,
            "user/emails/alice@example.com"
        );
    }

    #[test]
    fn test_email_details_requires_address() {
        let details = DESCRIPTOR.endpoint("get_email_details").unwrap();
        assert!(details.request(DESCRIPTOR.base, &args![]).is_err());
    }

    #[test]
    fn test_user_deserialization() {
        let json_str = concat!(
            r#"{"uuid":"{d301aafa-d676-4ee0-88be-962be7417567}","username":"alice","#,
            r#""display_name":"Alice Liddell","account_status":"active","#,
            r#""created_on":"2018-03-04T11:24:08.146311+00:00","#,
            r#""links":{"html":{"href":"https://bitbucket.org/alice/"}}}"#
        );

        let user: User = serde_json::from_str(json_str).unwrap();

        assert_eq!(user.username.as_deref(), Some("alice"));
        assert_eq!(user.display_name.as_deref(), Some("Alice Liddell"));
        assert!(user.created_on.is_some());
        assert_eq!(
            user.links.unwrap().html.unwrap().href,
            "https://bitbucket.org/alice/"
        );
    }

    #[test]
    fn test_email_deserialization() {
        let email: Email = serde_json::from_str(
            r#"{"email":"alice@example.com","is_primary":true,"is_confirmed":true,"type":"email"}"#,
        )
        .unwrap();

        assert_eq!(email.email, "alice@example.com");
        assert!(email.is_primary);
    }
}
