//! Fixtures and scripted repositories shared by the bootstrap tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::channel::oneshot;

use crate::error::ApiError;
use crate::models::{BootstrapResponse, ProfileRecord, RoleRecord, UserRecord};
use crate::repository::{BootstrapRepository, MeRepository};

pub(crate) fn user() -> UserRecord {
    UserRecord {
        id: "u1".to_string(),
        auth_id: "auth|u1".to_string(),
        email: Some("ruth@example.org".to_string()),
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn profile() -> ProfileRecord {
    ProfileRecord {
        id: "p1".to_string(),
        user_id: "u1".to_string(),
        first_name: Some("Ruth".to_string()),
        last_name: None,
        phone: None,
    }
}

pub(crate) fn role(name: &str) -> RoleRecord {
    RoleRecord {
        id: format!("assignment-{name}"),
        user_id: "u1".to_string(),
        role_id: format!("role-{name}"),
        role_name: name.to_string(),
        is_active: true,
        assigned_date: None,
    }
}

pub(crate) fn member_role() -> RoleRecord {
    role("Member")
}

pub(crate) fn response() -> BootstrapResponse {
    BootstrapResponse {
        user: Some(user()),
        profile: Some(profile()),
        roles: Some(vec![member_role()]),
        created: None,
    }
}

/// Bootstrap repository that replays scripted results, then `fallback`.
pub(crate) struct ScriptedRepository {
    calls: AtomicUsize,
    script: Mutex<VecDeque<Result<BootstrapResponse, ApiError>>>,
    fallback: BootstrapResponse,
}

impl ScriptedRepository {
    pub(crate) fn succeeding(response: BootstrapResponse) -> Arc<Self> {
        Self::scripted(Vec::new(), response)
    }

    pub(crate) fn scripted(
        script: Vec<Result<BootstrapResponse, ApiError>>,
        fallback: BootstrapResponse,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            script: Mutex::new(script.into()),
            fallback,
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BootstrapRepository for ScriptedRepository {
    async fn post(&self) -> Result<BootstrapResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Suspend so concurrent callers get a chance to interleave.
        tokio::task::yield_now().await;
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

/// Bootstrap repository whose first request waits until the test releases
/// it. Later requests return `fallback` at once.
pub(crate) struct HeldRepository {
    calls: AtomicUsize,
    held: Mutex<Option<oneshot::Receiver<BootstrapResponse>>>,
    fallback: BootstrapResponse,
}

impl HeldRepository {
    pub(crate) fn new(fallback: BootstrapResponse) -> (Arc<Self>, oneshot::Sender<BootstrapResponse>) {
        let (release, held) = oneshot::channel();
        let repo = Arc::new(Self {
            calls: AtomicUsize::new(0),
            held: Mutex::new(Some(held)),
            fallback,
        });
        (repo, release)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BootstrapRepository for HeldRepository {
    async fn post(&self) -> Result<BootstrapResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let held = self.held.lock().unwrap().take();
        match held {
            Some(held) => held
                .await
                .map_err(|_| ApiError::Network("request abandoned".to_string())),
            None => Ok(self.fallback.clone()),
        }
    }
}

/// Per-resource repository that counts every request.
pub(crate) struct CountingMe {
    pub(crate) profile_calls: AtomicUsize,
    pub(crate) roles_calls: AtomicUsize,
    profile: Option<ProfileRecord>,
    roles: Vec<RoleRecord>,
}

impl CountingMe {
    pub(crate) fn new(profile: Option<ProfileRecord>, roles: Vec<RoleRecord>) -> Arc<Self> {
        Arc::new(Self {
            profile_calls: AtomicUsize::new(0),
            roles_calls: AtomicUsize::new(0),
            profile,
            roles,
        })
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst) + self.roles_calls.load(Ordering::SeqCst)
    }
}

impl MeRepository for CountingMe {
    async fn profile(&self) -> Result<Option<ProfileRecord>, ApiError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.profile.clone())
    }

    async fn roles(&self) -> Result<Vec<RoleRecord>, ApiError> {
        self.roles_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.roles.clone())
    }
}
