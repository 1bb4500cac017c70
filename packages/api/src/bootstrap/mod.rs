//! # Session bootstrap
//!
//! One network call fills the cache for the whole session:
//!
//! 1. A screen mounts while the member is signed in and asks the
//!    [`BootstrapGate`] whether it may proceed.
//! 2. If the cache is not seeded yet, the gate asks the
//!    [`BootstrapCoordinator`] for the bootstrap task. The coordinator starts
//!    at most one `post()` at a time; every other caller gets a clone of the
//!    task already running.
//! 3. When the response arrives, [`seed`] writes `me`, `me.profile`,
//!    `me.roles` and finally `bootstrap.seeded` in a single cache batch.
//! 4. The gate opens and role/profile queries read from the cache.
//!
//! Signing out clears the cache, which starts a new cache generation. A
//! response that arrives for an older generation is discarded.

mod coordinator;
mod gate;
mod seed;

pub use coordinator::{BootstrapCoordinator, BootstrapTask};
pub use gate::{is_ready, is_seeded, needs_bootstrap, BootstrapGate};
pub use seed::{seed, seed_for};

#[cfg(test)]
pub(crate) mod testing;
