//! # Session query cache
//!
//! [`QueryCache`] is the client-side key/value cache every screen reads from.
//! Values are kept in their JSON form ([`serde_json::Value`]) so a single map
//! can hold users, profiles, role lists and flags side by side; typed access
//! goes through [`QueryCache::get`] / [`QueryCache::set`].
//!
//! ## Absent vs. null
//!
//! An unset key and a key holding JSON `null` are different states. Reading
//! `Option<T>` from a `null` entry yields `Some(None)`: the value is known and
//! there is nothing there. Reading an unset key yields `None`: nobody has
//! asked yet.
//!
//! ## Change notification
//!
//! Every write bumps a version counter published through a
//! [`tokio::sync::watch`] channel. [`QueryCache::batch`] applies several
//! writes under one lock and publishes a single version bump, so an observer
//! never sees half of a batch.
//!
//! ## Generations
//!
//! [`QueryCache::clear`] starts a new generation. Work that began before the
//! clear (a bootstrap request, a query fetch) captures
//! [`QueryCache::generation`] up front and writes through
//! [`QueryCache::batch_for`], which drops the writes if the cache has been
//! cleared since. A signed-out session can't leak into the next one.
//!
//! The handle is cheap to clone; all clones share the same entries.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;

use crate::error::CacheError;
use crate::key::QueryKey;

#[derive(Clone, Debug)]
struct CacheEntry {
    value: Value,
    updated_at_ms: u64,
}

/// Shared, session-scoped query cache.
#[derive(Clone, Debug)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<QueryKey, CacheEntry>>>,
    version: Arc<watch::Sender<u64>>,
    /// Bumped by `clear` while the entries lock is held.
    generation: Arc<AtomicU64>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0);
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            version: Arc::new(version),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn bump(&self) {
        self.version.send_modify(|v| *v += 1);
    }

    /// Read a typed value, surfacing shape mismatches.
    pub fn try_get<T: DeserializeOwned>(&self, key: &QueryKey) -> Result<Option<T>, CacheError> {
        let value = match self.lock().get(key) {
            Some(entry) => entry.value.clone(),
            None => return Ok(None),
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| CacheError::Deserialize {
                key: key.clone(),
                message: e.to_string(),
            })
    }

    /// Read a typed value. A value of the wrong shape reads as unset.
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(%key, error = %e, "ignoring cache entry");
                None
            }
        }
    }

    /// Store a value and notify subscribers.
    pub fn set<T: Serialize + ?Sized>(&self, key: &QueryKey, value: &T) -> Result<(), CacheError> {
        self.batch(|writer| writer.set(key, value))
    }

    /// Apply several writes atomically with a single notification.
    ///
    /// Nothing is written if `f` returns an error.
    pub fn batch<F>(&self, f: F) -> Result<(), CacheError>
    where
        F: FnOnce(&mut CacheWriter) -> Result<(), CacheError>,
    {
        self.apply(None, f).map(|_| ())
    }

    /// Like [`batch`](Self::batch), but only if the cache is still in
    /// `generation`. Returns `Ok(false)` and writes nothing when it has been
    /// cleared in the meantime.
    pub fn batch_for<F>(&self, generation: u64, f: F) -> Result<bool, CacheError>
    where
        F: FnOnce(&mut CacheWriter) -> Result<(), CacheError>,
    {
        self.apply(Some(generation), f)
    }

    fn apply<F>(&self, generation: Option<u64>, f: F) -> Result<bool, CacheError>
    where
        F: FnOnce(&mut CacheWriter) -> Result<(), CacheError>,
    {
        let mut writer = CacheWriter { staged: Vec::new() };
        f(&mut writer)?;

        let now = now_millis();
        {
            let mut entries = self.lock();
            if let Some(expected) = generation {
                if self.generation() != expected {
                    tracing::debug!(expected, "cache cleared since read, dropping writes");
                    return Ok(false);
                }
            }
            if writer.staged.is_empty() {
                return Ok(true);
            }
            for (key, value) in writer.staged {
                tracing::debug!(%key, "cache write");
                entries.insert(
                    key,
                    CacheEntry {
                        value,
                        updated_at_ms: now,
                    },
                );
            }
        }
        self.bump();
        Ok(true)
    }

    /// Current generation; changes on every [`clear`](Self::clear).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.lock().contains_key(key)
    }

    /// Milliseconds since the Unix epoch at which `key` was last written.
    pub fn updated_at(&self, key: &QueryKey) -> Option<u64> {
        self.lock().get(key).map(|entry| entry.updated_at_ms)
    }

    /// Age of the entry in milliseconds, `None` when unset.
    pub(crate) fn age_ms(&self, key: &QueryKey) -> Option<u64> {
        self.updated_at(key)
            .map(|updated| now_millis().saturating_sub(updated))
    }

    pub fn remove(&self, key: &QueryKey) -> bool {
        let removed = self.lock().remove(key).is_some();
        if removed {
            self.bump();
        }
        removed
    }

    /// Whether the bootstrap flag has been written as `true`.
    pub fn is_seeded(&self) -> bool {
        self.get::<bool>(&QueryKey::BOOTSTRAP_SEEDED).unwrap_or(false)
    }

    /// Drop every entry and start a new generation. Called on sign-out.
    pub fn clear(&self) {
        let count = {
            let mut entries = self.lock();
            let count = entries.len();
            entries.clear();
            self.generation.fetch_add(1, Ordering::SeqCst);
            count
        };
        tracing::info!(entries = count, "query cache cleared");
        self.bump();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Receiver that changes whenever the cache is written.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    /// Current change counter.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }
}

/// Staging area handed to [`QueryCache::batch`].
pub struct CacheWriter {
    staged: Vec<(QueryKey, Value)>,
}

impl CacheWriter {
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &QueryKey, value: &T) -> Result<(), CacheError> {
        let value = serde_json::to_value(value).map_err(|e| CacheError::Serialize {
            key: key.clone(),
            message: e.to_string(),
        })?;
        self.staged.push((key.clone(), value));
        Ok(())
    }
}

fn now_millis() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
