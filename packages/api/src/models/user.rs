//! # Identity record of the signed-in member
//!
//! [`UserRecord`] is what the bootstrap call returns under `user` and what the
//! cache holds under `me`. The client treats it as opaque apart from the
//! display helper: the `id` is the API's primary key, `auth_id` is the
//! identifier issued by the external sign-in provider, and the timestamps are
//! passed through as the server formats them.

use serde::{Deserialize, Serialize};

/// User record safe to hold on the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub auth_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl UserRecord {
    /// Get display label, falling back to the user id if no email is set.
    pub fn display_label(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}
