//! Session context and hooks shared by every Fellowship screen.

mod auth;
pub use auth::{sign_in, sign_out, use_auth, AuthState};

mod session;
pub use session::{use_session, Session, SessionProvider};

mod hooks;
pub use hooks::{
    use_bootstrap_gate, use_profile, use_roles, use_tab_visibility, BootstrapGateState,
};
