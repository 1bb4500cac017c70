//! Hooks over the session core.
//!
//! [`use_bootstrap_gate`] is the only hook that starts network work on its
//! own; the others read the cache behind the gate. Failures are returned to
//! the component rather than swallowed: the gate carries the last bootstrap
//! error, and the role and profile resources resolve to a `Result`.

use api::bootstrap::is_ready;
use api::{ApiError, BootstrapError, ProfileRecord, RoleRecord, TabVisibility};
use dioxus::prelude::*;
use store::{QueryCache, QueryResult, QueryTrigger};

use crate::auth::use_auth;
use crate::session::use_session;

/// Mirror the cache's change counter into a signal so memos and effects
/// re-run on every cache write.
fn use_cache_version(cache: QueryCache) -> Signal<u64> {
    let mut version = use_signal(|| cache.version());

    use_future(move || {
        let mut changes = cache.subscribe();
        async move {
            while changes.changed().await.is_ok() {
                version.set(*changes.borrow_and_update());
            }
        }
    });

    version
}

/// Readiness of bootstrap-gated content, as seen by one component.
#[derive(Clone, Copy)]
pub struct BootstrapGateState {
    /// Whether gated content may render.
    pub ready: Memo<bool>,
    /// Error of the last bootstrap attempt this component waited on.
    pub error: Signal<Option<BootstrapError>>,
    attempt: Signal<u32>,
}

impl BootstrapGateState {
    /// Try the bootstrap again after a failure. A no-op once seeded.
    pub fn retry(&self) {
        let mut attempt = self.attempt;
        attempt += 1;
    }
}

/// Error state after a bootstrap attempt settles. `None` leaves the state
/// as it is: a superseded attempt says nothing about the current session.
fn settled_error(result: Result<(), BootstrapError>) -> Option<Option<BootstrapError>> {
    match result {
        Ok(()) => Some(None),
        Err(BootstrapError::Superseded) => None,
        Err(e) => Some(Some(e)),
    }
}

/// Whether bootstrap-gated content may render.
///
/// Open while the member is not signed in. Once signed in, starts (or joins)
/// the session bootstrap and stays closed until the cache is seeded. A failed
/// attempt is retried when a component mounts or calls
/// [`BootstrapGateState::retry`]. Safe to use from any number of components.
pub fn use_bootstrap_gate() -> BootstrapGateState {
    let auth = use_auth();
    let session = use_session();
    let version = use_cache_version(session.cache.clone());
    let mut error = use_signal(|| None::<BootstrapError>);
    let attempt = use_signal(|| 0u32);

    let gate = session.gate.clone();
    use_effect(move || {
        let status = auth.read().status;
        let _ = version();
        let _ = attempt();
        if let Some(task) = gate.trigger(status) {
            spawn(async move {
                if let Some(next) = settled_error(task.await) {
                    if let Some(e) = &next {
                        tracing::warn!("Bootstrap failed, gate stays closed: {}", e);
                    }
                    error.set(next);
                }
            });
        }
    });

    let cache = session.cache.clone();
    let ready = use_memo(move || {
        let status = auth.read().status;
        let _ = version();
        is_ready(status, &cache)
    });

    BootstrapGateState {
        ready,
        error,
        attempt,
    }
}

/// Roles of the signed-in member. `data` is `None` while the gate is closed.
pub fn use_roles() -> Resource<Result<QueryResult<Vec<RoleRecord>>, ApiError>> {
    let auth = use_auth();
    let gate = use_bootstrap_gate();
    let session = use_session();

    use_resource(move || {
        let enabled = auth.read().status.is_signed_in() && (gate.ready)();
        let me = session.me.clone();
        async move {
            let result = me.roles(enabled, QueryTrigger::Mount).await;
            if let Err(e) = &result {
                tracing::warn!("Failed to load roles: {}", e);
            }
            result
        }
    })
}

/// Profile of the signed-in member.
///
/// `data` is `None` while the gate is closed, `Some(None)` once it is known
/// that the member has no profile.
pub fn use_profile() -> Resource<Result<QueryResult<Option<ProfileRecord>>, ApiError>> {
    let auth = use_auth();
    let gate = use_bootstrap_gate();
    let session = use_session();

    use_resource(move || {
        let enabled = auth.read().status.is_signed_in() && (gate.ready)();
        let me = session.me.clone();
        async move {
            let result = me.profile(enabled, QueryTrigger::Mount).await;
            if let Err(e) = &result {
                tracing::warn!("Failed to load profile: {}", e);
            }
            result
        }
    })
}

/// Tab visibility for the current roles snapshot. Restricted tabs stay
/// hidden until roles are known, and after a failed load.
pub fn use_tab_visibility() -> TabVisibility {
    let roles = use_roles();
    let current = known_roles(roles.cloned());
    TabVisibility::from_roles(current.as_deref())
}

/// Roles from a resource snapshot; `None` while pending, disabled or failed.
fn known_roles(
    snapshot: Option<Result<QueryResult<Vec<RoleRecord>>, ApiError>>,
) -> Option<Vec<RoleRecord>> {
    snapshot.and_then(Result::ok).and_then(|result| result.data)
}
