//! # Bootstrap coordinator
//!
//! [`BootstrapCoordinator::ensure_bootstrap`] is safe to call from every
//! screen on every mount. It hands back a [`BootstrapTask`], a cloneable
//! shared future:
//!
//! - cache already seeded: a task that is immediately `Ok(())`;
//! - a bootstrap already running for this cache generation: a clone of that task;
//! - otherwise: a new task, stored in the coordinator's single-slot guard.
//!
//! The check and the store happen in one synchronous borrow of the slot with
//! no `.await` in between, so two callers can never both start a request.
//! The task empties the slot when it finishes, successfully or not, so a
//! failed attempt is retried by the next caller. Everyone awaiting the same
//! task receives the same result.
//!
//! The slot remembers the cache generation its task was started in. Once the
//! cache is cleared (sign-out), that task no longer counts as in flight: the
//! next call starts a fresh request, and the old one resolves to
//! [`BootstrapError::Superseded`] without touching the cache.
//!
//! Each coordinator owns its own slot; there is no process-global state.
//! Tasks are `!Send` and run on the UI thread's executor, so the slot is a
//! `RefCell` behind an `Rc`. A task only holds a `Weak` back to it, so
//! dropping every coordinator handle mid-request frees the slot.

use std::cell::{RefCell, RefMut};
use std::rc::{Rc, Weak};

use futures::future::{self, FutureExt, LocalBoxFuture, Shared};
use store::config::BootstrapConfig;
use store::QueryCache;

use super::seed::seed_for;
use crate::error::BootstrapError;
use crate::repository::BootstrapRepository;

/// Shared handle to one bootstrap attempt.
pub type BootstrapTask = Shared<LocalBoxFuture<'static, Result<(), BootstrapError>>>;

pub struct BootstrapCoordinator<R> {
    inner: Rc<Inner<R>>,
}

impl<R> Clone for BootstrapCoordinator<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

struct Inner<R> {
    cache: QueryCache,
    repository: Rc<R>,
    config: BootstrapConfig,
    in_flight: RefCell<Option<InFlight>>,
}

struct InFlight {
    generation: u64,
    task: BootstrapTask,
}

impl<R> Inner<R> {
    fn slot(&self) -> RefMut<'_, Option<InFlight>> {
        self.in_flight.borrow_mut()
    }

    /// Empty the slot if it still holds the task for `generation`.
    fn release(&self, generation: u64) {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|f| f.generation == generation) {
            slot.take();
        }
    }
}

impl<R: BootstrapRepository + 'static> BootstrapCoordinator<R> {
    pub fn new(cache: QueryCache, repository: R) -> Self {
        Self::with_config(cache, repository, BootstrapConfig::default())
    }

    pub fn with_config(cache: QueryCache, repository: R, config: BootstrapConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                cache,
                repository: Rc::new(repository),
                config,
                in_flight: RefCell::new(None),
            }),
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.inner.cache
    }

    /// Whether a bootstrap request is outstanding for the current session.
    pub fn is_in_flight(&self) -> bool {
        let generation = self.inner.cache.generation();
        self.inner
            .in_flight
            .borrow()
            .as_ref()
            .is_some_and(|f| f.generation == generation)
    }

    /// End the session: forget any outstanding request and clear the cache.
    pub fn reset(&self) {
        self.inner.slot().take();
        self.inner.cache.clear();
    }

    /// Get the bootstrap task for this session, starting it if needed.
    pub fn ensure_bootstrap(&self) -> BootstrapTask {
        let mut slot = self.inner.slot();

        if self.inner.cache.is_seeded() {
            return future::ready(Ok(())).boxed_local().shared();
        }

        let generation = self.inner.cache.generation();
        if let Some(in_flight) = slot.as_ref() {
            if in_flight.generation == generation {
                tracing::debug!("joining in-flight bootstrap");
                return in_flight.task.clone();
            }
            tracing::debug!(
                stale = in_flight.generation,
                generation,
                "cache cleared since last bootstrap started"
            );
        }

        let task = self.start(generation);
        *slot = Some(InFlight {
            generation,
            task: task.clone(),
        });
        task
    }

    fn start(&self, generation: u64) -> BootstrapTask {
        let inner: Weak<Inner<R>> = Rc::downgrade(&self.inner);
        let cache = self.inner.cache.clone();
        let repository = Rc::clone(&self.inner.repository);
        let config = self.inner.config.clone();

        async move {
            let result = run(&cache, repository.as_ref(), &config, generation).await;
            if let Some(inner) = inner.upgrade() {
                inner.release(generation);
            }
            result
        }
        .boxed_local()
        .shared()
    }
}

async fn run<R: BootstrapRepository>(
    cache: &QueryCache,
    repository: &R,
    config: &BootstrapConfig,
    generation: u64,
) -> Result<(), BootstrapError> {
    tracing::info!(generation, "bootstrap request starting");

    let response = repository.post().await.map_err(|e| {
        tracing::warn!(error = %e, "bootstrap request failed");
        BootstrapError::from(e)
    })?;

    if response.user.is_none() {
        if config.require_user {
            tracing::warn!("bootstrap response has no user record");
            return Err(BootstrapError::MalformedResponse(
                "response has no user record".to_string(),
            ));
        }
        tracing::warn!("bootstrap response has no user record, seeding without identity");
    }

    if !seed_for(cache, generation, &response)? {
        tracing::info!(generation, "session ended during bootstrap, response dropped");
        return Err(BootstrapError::Superseded);
    }

    tracing::info!(
        has_user = response.user.is_some(),
        has_profile = response.profile.is_some(),
        roles = response.roles.as_ref().map(Vec::len),
        "bootstrap seeded"
    );
    Ok(())
}
