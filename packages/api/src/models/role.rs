use serde::{Deserialize, Serialize};

/// A role assignment for the signed-in member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleRecord {
    pub id: String,
    pub user_id: String,
    pub role_id: String,
    /// Display name of the role, e.g. "Member" or "Admin".
    pub role_name: String,
    pub is_active: bool,
    #[serde(default)]
    pub assigned_date: Option<String>,
}
