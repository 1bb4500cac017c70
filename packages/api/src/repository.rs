//! Network capabilities consumed by the session core.
//!
//! The core never talks HTTP itself; it is handed something that implements
//! these traits. [`crate::HttpClient`] is the production implementation, tests
//! substitute scripted fakes.

use std::future::Future;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{BootstrapResponse, ProfileRecord, RoleRecord};

/// The single bootstrap round trip.
pub trait BootstrapRepository {
    fn post(&self) -> impl Future<Output = Result<BootstrapResponse, ApiError>>;
}

/// Per-resource reads used when a screen needs data the bootstrap did not
/// provide.
pub trait MeRepository {
    /// `Ok(None)` when the member has no profile.
    fn profile(&self) -> impl Future<Output = Result<Option<ProfileRecord>, ApiError>>;
    fn roles(&self) -> impl Future<Output = Result<Vec<RoleRecord>, ApiError>>;
}

impl<R: BootstrapRepository> BootstrapRepository for Arc<R> {
    fn post(&self) -> impl Future<Output = Result<BootstrapResponse, ApiError>> {
        (**self).post()
    }
}

impl<R: MeRepository> MeRepository for Arc<R> {
    fn profile(&self) -> impl Future<Output = Result<Option<ProfileRecord>, ApiError>> {
        (**self).profile()
    }

    fn roles(&self) -> impl Future<Output = Result<Vec<RoleRecord>, ApiError>> {
        (**self).roles()
    }
}
