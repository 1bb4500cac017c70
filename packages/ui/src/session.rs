//! Per-app session objects, provided through context.

use api::{ApiConfig, BootstrapCoordinator, BootstrapGate, HttpClient, MeQueries};
use dioxus::prelude::*;
use store::{FellowshipConfig, QueryCache};

use crate::auth::AuthState;

/// Everything a screen needs to read session data.
///
/// All fields share state with their clones: one cache, one HTTP client and
/// one bootstrap guard per app.
#[derive(Clone)]
pub struct Session {
    pub cache: QueryCache,
    pub client: HttpClient,
    pub gate: BootstrapGate<HttpClient>,
    pub me: MeQueries<HttpClient>,
}

impl Session {
    pub fn new(client: HttpClient, config: &FellowshipConfig) -> Self {
        let cache = QueryCache::new();
        let coordinator = BootstrapCoordinator::with_config(
            cache.clone(),
            client.clone(),
            config.bootstrap.clone(),
        );
        Self {
            gate: BootstrapGate::new(coordinator),
            me: MeQueries::with_policy(cache.clone(), client.clone(), config.cache.default_policy()),
            cache,
            client,
        }
    }
}

/// Consume the [`Session`] from context.
pub fn use_session() -> Session {
    use_context::<Session>()
}

/// Provider component for the session and the auth state.
/// Wrap your app with this component.
#[component]
pub fn SessionProvider(#[props(default)] config: FellowshipConfig, children: Element) -> Element {
    let session = use_context_provider(|| {
        let api_config = ApiConfig::from_env().unwrap_or_else(|e| {
            tracing::error!("Falling back to default API config: {}", e);
            ApiConfig::default()
        });
        Session::new(HttpClient::new(api_config), &config)
    });

    use_context_provider(|| {
        let status = if session.client.has_token() {
            api::AuthStatus::SignedIn
        } else {
            api::AuthStatus::SignedOut
        };
        Signal::new(AuthState { status })
    });

    rsx! {
        {children}
    }
}
