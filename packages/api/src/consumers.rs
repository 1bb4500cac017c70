//! # Role and profile queries
//!
//! [`MeQueries`] reads the member's roles and profile from the session cache.
//! The values the bootstrap seeded (`me.roles`, `me.profile`) are read under
//! [`QueryPolicy::seeded`]: once written they are served from the cache on
//! every mount, focus and reconnect.
//!
//! The `enabled` flag comes from the bootstrap gate. A disabled query does no
//! I/O and reports no data. An enabled query only reaches the network when the
//! seeded key is unset (roles are optional in the bootstrap response) or on a
//! [`QueryTrigger::Manual`] refresh.
//!
//! Consumers never write the seeded keys. What they fetch themselves is kept
//! under their own keys (`me.roles.fetched`, `me.profile.fetched`), governed
//! by the configured default policy, and preferred over the seeded value once
//! present.
//!
//! A cached `null` profile is a complete answer: the member has no profile.
//! It is returned as `Some(None)` and never refetched.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{QueryCache, QueryKey, QueryOptions, QueryPolicy, QueryResult, QueryTrigger};

use crate::error::ApiError;
use crate::models::{ProfileRecord, RoleRecord};
use crate::repository::MeRepository;

const FETCHED_ROLES: &str = "me.roles.fetched";
const FETCHED_PROFILE: &str = "me.profile.fetched";

pub struct MeQueries<R> {
    cache: QueryCache,
    repository: R,
    policy: QueryPolicy,
}

impl<R: Clone> Clone for MeQueries<R> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            repository: self.repository.clone(),
            policy: self.policy,
        }
    }
}

impl<R: MeRepository> MeQueries<R> {
    pub fn new(cache: QueryCache, repository: R) -> Self {
        Self::with_policy(cache, repository, QueryPolicy::default())
    }

    /// Use `policy` for values this consumer fetches itself.
    pub fn with_policy(cache: QueryCache, repository: R, policy: QueryPolicy) -> Self {
        Self {
            cache,
            repository,
            policy,
        }
    }

    pub async fn roles(
        &self,
        enabled: bool,
        trigger: QueryTrigger,
    ) -> Result<QueryResult<Vec<RoleRecord>>, ApiError> {
        self.read(
            &QueryKey::ME_ROLES,
            &QueryKey::new(FETCHED_ROLES),
            enabled,
            trigger,
            || self.repository.roles(),
        )
        .await
    }

    pub async fn profile(
        &self,
        enabled: bool,
        trigger: QueryTrigger,
    ) -> Result<QueryResult<Option<ProfileRecord>>, ApiError> {
        self.read(
            &QueryKey::ME_PROFILE,
            &QueryKey::new(FETCHED_PROFILE),
            enabled,
            trigger,
            || self.repository.profile(),
        )
        .await
    }

    async fn read<T, F, Fut>(
        &self,
        seeded: &QueryKey,
        own: &QueryKey,
        enabled: bool,
        trigger: QueryTrigger,
        fetcher: F,
    ) -> Result<QueryResult<T>, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if enabled && !self.cache.contains(own) {
            if let Some(hit) = self
                .cache
                .cached_query(seeded, &QueryPolicy::seeded(), trigger)
            {
                return Ok(hit);
            }
        }

        let options = QueryOptions::new(self.policy).enabled(enabled);
        self.cache.fetch_query(own, &options, trigger, fetcher).await
    }
}
