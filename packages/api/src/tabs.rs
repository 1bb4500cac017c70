//! # Role-gated tabs
//!
//! Which tabs a member sees depends only on the names of their roles. While
//! roles are unknown (`None`) everything restricted stays hidden, so a member
//! never sees a tab flash in and out while the bootstrap is running.
//!
//! | Tab | Shown when |
//! |-----|-----------|
//! | [`Tab::Home`], [`Tab::Profile`] | always |
//! | [`Tab::Supper`] | the member holds a role other than "Member" |
//! | [`Tab::Admin`] | the member holds "Admin" |
//!
//! Values are derived from the current roles snapshot on every call.

use crate::models::RoleRecord;

pub const MEMBER_ROLE: &str = "Member";
pub const ADMIN_ROLE: &str = "Admin";

/// True when every role is "Member", or when roles are not known yet.
pub fn is_member_only(roles: Option<&[RoleRecord]>) -> bool {
    roles.map_or(true, |roles| {
        roles.iter().all(|role| role.role_name == MEMBER_ROLE)
    })
}

/// True when any role is "Admin". False while roles are not known.
pub fn is_admin(roles: Option<&[RoleRecord]>) -> bool {
    roles.map_or(false, |roles| {
        roles.iter().any(|role| role.role_name == ADMIN_ROLE)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Home,
    Supper,
    Profile,
    Admin,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Supper, Tab::Profile, Tab::Admin];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabVisibility {
    pub is_member_only: bool,
    pub is_admin: bool,
}

impl TabVisibility {
    pub fn from_roles(roles: Option<&[RoleRecord]>) -> Self {
        Self {
            is_member_only: is_member_only(roles),
            is_admin: is_admin(roles),
        }
    }

    pub fn shows(&self, tab: Tab) -> bool {
        match tab {
            Tab::Home | Tab::Profile => true,
            Tab::Supper => !self.is_member_only,
            Tab::Admin => self.is_admin,
        }
    }

    pub fn visible_tabs(&self) -> Vec<Tab> {
        Tab::ALL.into_iter().filter(|tab| self.shows(*tab)).collect()
    }
}
