//! # Client configuration — `fellowship.toml`
//!
//! Tunables for the session cache and the bootstrap step, read from a TOML
//! file bundled with the app (filename: [`FellowshipConfig::filename`]).
//!
//! ## Structure
//!
//! ```toml
//! [cache]
//! default_stale_after_secs = 30   # staleness window for non-seeded queries
//!
//! [bootstrap]
//! require_user = true             # reject a bootstrap response without `user`
//! ```
//!
//! All structs derive `Default`, so a missing or empty file is equivalent to
//! the default configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::query::QueryPolicy;

/// Top-level configuration stored in `fellowship.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FellowshipConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

/// Query cache configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds before a non-seeded query is considered stale.
    #[serde(default = "default_stale_after_secs")]
    pub default_stale_after_secs: u64,
}

fn default_stale_after_secs() -> u64 {
    30
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_stale_after_secs: default_stale_after_secs(),
        }
    }
}

impl CacheConfig {
    /// Policy applied to queries the bootstrap does not seed.
    pub fn default_policy(&self) -> QueryPolicy {
        QueryPolicy::default().with_stale_after(Duration::from_secs(self.default_stale_after_secs))
    }
}

/// Bootstrap configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Treat a response without a `user` record as a failure.
    /// When false the response is seeded anyway and `me` stays unset.
    #[serde(default = "default_require_user")]
    pub require_user: bool,
}

fn default_require_user() -> bool {
    true
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            require_user: default_require_user(),
        }
    }
}

impl FellowshipConfig {
    /// Builder method to set the default staleness window.
    pub fn with_stale_after_secs(mut self, secs: u64) -> Self {
        self.cache.default_stale_after_secs = secs;
        self
    }

    /// Builder method to toggle strict bootstrap validation.
    pub fn with_require_user(mut self, require_user: bool) -> Self {
        self.bootstrap.require_user = require_user;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "fellowship.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
