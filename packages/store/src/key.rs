//! Cache keys.
//!
//! A [`QueryKey`] is a dotted name (`"me.profile"`). The keys written by the
//! session bootstrap are exposed as constants so producers and consumers can't
//! drift apart on spelling.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a cache entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryKey(Cow<'static, str>);

impl QueryKey {
    /// Identity record of the signed-in user.
    pub const ME: QueryKey = QueryKey(Cow::Borrowed("me"));
    /// Profile of the signed-in user, `null` when none exists.
    pub const ME_PROFILE: QueryKey = QueryKey(Cow::Borrowed("me.profile"));
    /// Role assignments of the signed-in user.
    pub const ME_ROLES: QueryKey = QueryKey(Cow::Borrowed("me.roles"));
    /// Set to `true` once the bootstrap response has been written.
    pub const BOOTSTRAP_SEEDED: QueryKey = QueryKey(Cow::Borrowed("bootstrap.seeded"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for QueryKey {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}
