//! # Readiness gate
//!
//! Screens that depend on session data are gated on a single boolean. While
//! the member is not signed in the gate is open (nothing to wait for). Once
//! signed in, it stays closed until the cache is seeded.
//!
//! "Seeded" means `bootstrap.seeded == true`. Caches written before that flag
//! existed only carry `me`; [`is_seeded`] accepts that as well so those
//! sessions are not bootstrapped twice. New code should rely on the flag.

use store::{QueryCache, QueryKey};

use super::coordinator::{BootstrapCoordinator, BootstrapTask};
use crate::auth::AuthStatus;
use crate::error::BootstrapError;
use crate::repository::BootstrapRepository;

/// Whether the session data is in the cache.
pub fn is_seeded(cache: &QueryCache) -> bool {
    cache.is_seeded() || cache.contains(&QueryKey::ME)
}

/// Whether gated screens may render.
pub fn is_ready(status: AuthStatus, cache: &QueryCache) -> bool {
    !status.is_signed_in() || is_seeded(cache)
}

/// Whether a bootstrap should be started for this status.
pub fn needs_bootstrap(status: AuthStatus, cache: &QueryCache) -> bool {
    status.is_signed_in() && !is_seeded(cache)
}

/// Gate logic bound to a coordinator.
pub struct BootstrapGate<R> {
    coordinator: BootstrapCoordinator<R>,
}

impl<R> Clone for BootstrapGate<R> {
    fn clone(&self) -> Self {
        Self {
            coordinator: self.coordinator.clone(),
        }
    }
}

impl<R: BootstrapRepository + 'static> BootstrapGate<R> {
    pub fn new(coordinator: BootstrapCoordinator<R>) -> Self {
        Self { coordinator }
    }

    pub fn coordinator(&self) -> &BootstrapCoordinator<R> {
        &self.coordinator
    }

    pub fn ready(&self, status: AuthStatus) -> bool {
        is_ready(status, self.coordinator.cache())
    }

    /// Start (or join) the bootstrap if this status requires one.
    ///
    /// Returns `None` when there is nothing to wait for. Safe to call on every
    /// render.
    pub fn trigger(&self, status: AuthStatus) -> Option<BootstrapTask> {
        needs_bootstrap(status, self.coordinator.cache())
            .then(|| self.coordinator.ensure_bootstrap())
    }

    /// Trigger if needed, wait, and report readiness.
    pub async fn wait_ready(&self, status: AuthStatus) -> Result<bool, BootstrapError> {
        if let Some(task) = self.trigger(status) {
            task.await?;
        }
        Ok(self.ready(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::testing::{response, user, ScriptedRepository};
    use crate::error::ApiError;
    use std::sync::Arc;

    fn gate(
        cache: QueryCache,
        repo: Arc<ScriptedRepository>,
    ) -> BootstrapGate<Arc<ScriptedRepository>> {
        BootstrapGate::new(BootstrapCoordinator::new(cache, repo))
    }

    #[test]
    fn test_open_while_not_signed_in() {
        let cache = QueryCache::new();
        for status in [AuthStatus::Idle, AuthStatus::Loading, AuthStatus::SignedOut] {
            assert!(is_ready(status, &cache));
            assert!(!needs_bootstrap(status, &cache));
        }
    }

    #[test]
    fn test_closed_while_signed_in_and_unseeded() {
        let cache = QueryCache::new();
        assert!(!is_ready(AuthStatus::SignedIn, &cache));
        assert!(needs_bootstrap(AuthStatus::SignedIn, &cache));
    }

    #[test]
    fn test_identity_key_counts_as_seeded() {
        let cache = QueryCache::new();
        cache.set(&QueryKey::ME, &user()).unwrap();

        assert!(!cache.is_seeded());
        assert!(is_seeded(&cache));
        assert!(is_ready(AuthStatus::SignedIn, &cache));
    }

    #[test]
    fn test_trigger_does_nothing_when_signed_out() {
        let repo = ScriptedRepository::succeeding(response());
        let gate = gate(QueryCache::new(), repo.clone());

        assert!(gate.trigger(AuthStatus::SignedOut).is_none());
        assert!(!gate.coordinator().is_in_flight());
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_legacy_session_skips_request() {
        let cache = QueryCache::new();
        cache.set(&QueryKey::ME, &user()).unwrap();
        let repo = ScriptedRepository::succeeding(response());
        let gate = gate(cache, repo.clone());

        assert!(gate.trigger(AuthStatus::SignedIn).is_none());
        assert!(gate.wait_ready(AuthStatus::SignedIn).await.unwrap());
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_wait_ready_opens_after_seeding() {
        let repo = ScriptedRepository::succeeding(response());
        let gate = gate(QueryCache::new(), repo.clone());

        assert!(!gate.ready(AuthStatus::SignedIn));
        assert!(gate.wait_ready(AuthStatus::SignedIn).await.unwrap());
        assert_eq!(repo.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_bootstrap_keeps_gate_closed() {
        let repo = ScriptedRepository::scripted(
            vec![Err(ApiError::Network("offline".to_string()))],
            response(),
        );
        let gate = gate(QueryCache::new(), repo.clone());

        assert!(gate.wait_ready(AuthStatus::SignedIn).await.is_err());
        assert!(!gate.ready(AuthStatus::SignedIn));

        // Next render retries.
        assert!(gate.wait_ready(AuthStatus::SignedIn).await.unwrap());
        assert_eq!(repo.calls(), 2);
    }

    /// Two screens mount at once for a signed-in member with an empty cache.
    #[tokio::test]
    async fn test_two_screens_mount_together() {
        let cache = QueryCache::new();
        let repo = ScriptedRepository::succeeding(response());
        let gate = gate(cache.clone(), repo.clone());

        let mount = |gate: BootstrapGate<Arc<ScriptedRepository>>| async move {
            let ready_on_first_render = gate.ready(AuthStatus::SignedIn);
            let task = gate.trigger(AuthStatus::SignedIn);
            if let Some(task) = task {
                task.await.unwrap();
            }
            (ready_on_first_render, gate.ready(AuthStatus::SignedIn))
        };

        let (tabs, profile) = futures::join!(mount(gate.clone()), mount(gate.clone()));

        assert_eq!(tabs, (false, true));
        assert_eq!(profile, (false, true));
        assert_eq!(repo.calls(), 1);
        assert!(cache.contains(&QueryKey::ME));
        assert!(cache.contains(&QueryKey::ME_PROFILE));
        assert!(cache.contains(&QueryKey::ME_ROLES));
        assert!(cache.is_seeded());
    }
}
