//! # Bootstrap response
//!
//! The body of `POST /api/bootstrap`. It is decoded once per session, split
//! into cache entries by [`crate::bootstrap::seed`] and then dropped.
//!
//! Field presence carries meaning:
//!
//! - `profile`: `null` and missing both decode to `None`, meaning "this member
//!   has no profile". That is a final answer, not a pending one.
//! - `roles`: missing decodes to `None`, meaning "not included in this
//!   response". An empty array is a different answer (no roles at all).
//! - `user`: always sent by a healthy server. It is optional here only so a
//!   response without it can be detected and rejected instead of failing to
//!   decode.

use serde::{Deserialize, Serialize};

use super::{ProfileRecord, RoleRecord, UserRecord};

/// What the server created while handling the bootstrap call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedFlags {
    /// The auth identity was linked to a new user row.
    #[serde(default)]
    pub linked: bool,
    /// An empty profile was created.
    #[serde(default)]
    pub profile: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BootstrapResponse {
    #[serde(default)]
    pub user: Option<UserRecord>,
    #[serde(default)]
    pub profile: Option<ProfileRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<CreatedFlags>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_response() {
        let body = r#"{
            "user": { "id": "u1", "auth_id": "auth|1", "email": "ruth@example.org" },
            "profile": { "id": "p1", "user_id": "u1", "first_name": "Ruth" },
            "roles": [
                { "id": "r1", "user_id": "u1", "role_id": "10", "role_name": "Member", "is_active": true }
            ],
            "created": { "linked": true, "profile": false }
        }"#;
        let response: BootstrapResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.user.as_ref().unwrap().display_label(), "ruth@example.org");
        assert_eq!(response.profile.as_ref().unwrap().full_name().as_deref(), Some("Ruth"));
        assert_eq!(response.roles.as_ref().unwrap()[0].role_name, "Member");
        assert_eq!(
            response.created,
            Some(CreatedFlags {
                linked: true,
                profile: false
            })
        );
    }

    #[test]
    fn test_null_profile_and_missing_roles() {
        let body = r#"{ "user": { "id": "u1", "auth_id": "auth|1" }, "profile": null }"#;
        let response: BootstrapResponse = serde_json::from_str(body).unwrap();

        assert!(response.profile.is_none());
        assert!(response.roles.is_none());
        assert!(response.created.is_none());
    }

    #[test]
    fn test_empty_roles_are_not_missing_roles() {
        let body = r#"{ "user": { "id": "u1", "auth_id": "auth|1" }, "profile": null, "roles": [] }"#;
        let response: BootstrapResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.roles, Some(Vec::new()));
    }
}
