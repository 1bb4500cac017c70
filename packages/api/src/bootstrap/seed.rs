use store::{CacheError, CacheWriter, QueryCache, QueryKey};

use crate::models::BootstrapResponse;

/// Write a bootstrap response into the cache.
///
/// `me` is written only when the response carries a user and `me.roles` only
/// when it carries roles; `me.profile` is always written, as `null` when the
/// member has no profile. `bootstrap.seeded` is written last. All writes land
/// in one batch, so observers see either none of them or all of them.
pub fn seed(cache: &QueryCache, response: &BootstrapResponse) -> Result<(), CacheError> {
    cache.batch(|w| write_response(w, response))
}

/// [`seed`] on behalf of a request started in cache `generation`.
///
/// Returns `Ok(false)` without writing anything when the cache has been
/// cleared since, i.e. the member signed out while the request was in flight.
pub fn seed_for(
    cache: &QueryCache,
    generation: u64,
    response: &BootstrapResponse,
) -> Result<bool, CacheError> {
    cache.batch_for(generation, |w| write_response(w, response))
}

fn write_response(w: &mut CacheWriter, response: &BootstrapResponse) -> Result<(), CacheError> {
    if let Some(user) = &response.user {
        w.set(&QueryKey::ME, user)?;
    }
    w.set(&QueryKey::ME_PROFILE, &response.profile)?;
    if let Some(roles) = &response.roles {
        w.set(&QueryKey::ME_ROLES, roles)?;
    }
    w.set(&QueryKey::BOOTSTRAP_SEEDED, &true)
}
