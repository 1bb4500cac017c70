//! # Query policies and the query runner
//!
//! A query is a cached read: a key, a fetcher, and a [`QueryPolicy`] deciding
//! when a cached value is good enough. [`QueryCache::fetch_query`] is the one
//! place that decision is made.
//!
//! | Situation | Result |
//! |-----------|--------|
//! | `enabled == false` | no I/O, [`QuerySource::Disabled`] |
//! | entry unset | fetch, store, [`QuerySource::Network`] |
//! | entry fresh | [`QuerySource::Cache`] (unless [`QueryTrigger::Manual`]) |
//! | entry stale | fetch only if the policy refetches on this trigger |
//!
//! Keys filled by the session bootstrap use [`QueryPolicy::seeded`]: never
//! stale and never refetched, so reading them after seeding costs nothing.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cache::QueryCache;
use crate::error::CacheError;
use crate::key::QueryKey;

/// Which lifecycle events may refetch a stale entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefetchOn {
    pub mount: bool,
    pub focus: bool,
    pub reconnect: bool,
}

impl RefetchOn {
    pub const NEVER: RefetchOn = RefetchOn {
        mount: false,
        focus: false,
        reconnect: false,
    };

    pub const ALWAYS: RefetchOn = RefetchOn {
        mount: true,
        focus: true,
        reconnect: true,
    };
}

/// Staleness and refetch rules for one query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryPolicy {
    pub stale_after: Duration,
    pub refetch_on: RefetchOn,
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(30),
            refetch_on: RefetchOn::ALWAYS,
        }
    }
}

impl QueryPolicy {
    /// Policy for bootstrap-seeded keys.
    pub const fn seeded() -> Self {
        Self {
            stale_after: Duration::MAX,
            refetch_on: RefetchOn::NEVER,
        }
    }

    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }

    pub fn with_refetch_on(mut self, refetch_on: RefetchOn) -> Self {
        self.refetch_on = refetch_on;
        self
    }

    /// Decide whether to hit the network given the cached entry's age.
    pub fn should_fetch(&self, age: Option<Duration>, trigger: QueryTrigger) -> bool {
        let Some(age) = age else {
            return true;
        };
        if trigger == QueryTrigger::Manual {
            return true;
        }
        if age < self.stale_after {
            return false;
        }
        match trigger {
            QueryTrigger::Mount => self.refetch_on.mount,
            QueryTrigger::Focus => self.refetch_on.focus,
            QueryTrigger::Reconnect => self.refetch_on.reconnect,
            QueryTrigger::Manual => true,
        }
    }
}

/// Event that caused a query to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryTrigger {
    Mount,
    Focus,
    Reconnect,
    Manual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryOptions {
    /// When false the query does no I/O and reports no data.
    pub enabled: bool,
    pub policy: QueryPolicy,
}

impl QueryOptions {
    pub fn new(policy: QueryPolicy) -> Self {
        Self {
            enabled: true,
            policy,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Where a query's data came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuerySource {
    Disabled,
    Cache,
    Network,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryResult<T> {
    pub data: Option<T>,
    pub source: QuerySource,
}

impl<T> QueryResult<T> {
    pub fn disabled() -> Self {
        Self {
            data: None,
            source: QuerySource::Disabled,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.source == QuerySource::Disabled
    }

    pub fn from_network(&self) -> bool {
        self.source == QuerySource::Network
    }
}

impl QueryCache {
    /// The cached result `key` would be served from without I/O, or `None`
    /// when the entry is unset or `policy` wants a fetch for this trigger.
    pub fn cached_query<T: DeserializeOwned>(
        &self,
        key: &QueryKey,
        policy: &QueryPolicy,
        trigger: QueryTrigger,
    ) -> Option<QueryResult<T>> {
        let data = self.get::<T>(key)?;
        let age = self.age_ms(key).map(Duration::from_millis);
        if policy.should_fetch(age, trigger) {
            return None;
        }
        tracing::debug!(%key, ?trigger, "query served from cache");
        Some(QueryResult {
            data: Some(data),
            source: QuerySource::Cache,
        })
    }

    /// Run a query against the cache, calling `fetcher` only when the policy
    /// requires it. Fetched values are written back under `key` unless the
    /// cache was cleared while the fetch was outstanding.
    pub async fn fetch_query<T, E, F, Fut>(
        &self,
        key: &QueryKey,
        options: &QueryOptions,
        trigger: QueryTrigger,
        fetcher: F,
    ) -> Result<QueryResult<T>, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !options.enabled {
            return Ok(QueryResult::disabled());
        }

        if let Some(hit) = self.cached_query(key, &options.policy, trigger) {
            return Ok(hit);
        }

        tracing::debug!(%key, ?trigger, "query fetching");
        let generation = self.generation();
        let data = fetcher().await?;
        if !self.batch_for(generation, |w| w.set(key, &data))? {
            tracing::debug!(%key, "cache cleared during fetch, result not stored");
        }
        Ok(QueryResult {
            data: Some(data),
            source: QuerySource::Network,
        })
    }
}
