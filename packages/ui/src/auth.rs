//! Authentication context for the UI.
//!
//! The sign-in flow itself belongs to the external auth provider; this module
//! only tracks its status and tears the session down on sign-out.

use api::AuthStatus;
use dioxus::prelude::*;

use crate::session::Session;

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub status: AuthStatus,
}

/// Get the current authentication state.
/// Returns a signal that updates when the member signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Record a completed sign-in. Gated screens start the bootstrap on their
/// next render.
pub fn sign_in(mut auth: Signal<AuthState>, session: &Session, token: String) {
    session.client.set_token(Some(token));
    auth.set(AuthState {
        status: AuthStatus::SignedIn,
    });
}

/// End the session: forget the token, drop every cached entry (including the
/// bootstrap flag) and abandon any bootstrap still in flight.
pub fn sign_out(mut auth: Signal<AuthState>, session: &Session) {
    session.client.set_token(None);
    session.gate.coordinator().reset();
    auth.set(AuthState {
        status: AuthStatus::SignedOut,
    });
    tracing::info!("Signed out, session cache cleared");
}
