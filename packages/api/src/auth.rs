//! Sign-in status reported by the external auth provider.

use serde::{Deserialize, Serialize};

/// Where the auth provider is in its sign-in lifecycle.
///
/// Only [`AuthStatus::SignedIn`] starts the session bootstrap; every other
/// status leaves bootstrap-gated screens unblocked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthStatus {
    #[default]
    Idle,
    Loading,
    SignedIn,
    SignedOut,
}

impl AuthStatus {
    pub fn is_signed_in(self) -> bool {
        self == AuthStatus::SignedIn
    }
}
