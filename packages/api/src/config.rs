//! API endpoint configuration from environment variables.

use crate::error::ApiError;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Where the Fellowship API lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    /// Bearer token issued by the auth provider, if already known.
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
        }
    }
}

impl ApiConfig {
    /// Create a config for an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "API_BASE_URL must be an http(s) URL, got {base_url:?}"
            )));
        }
        Ok(Self {
            base_url,
            token: None,
        })
    }

    /// Read `API_BASE_URL` and `API_TOKEN` from the environment (and `.env`).
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        let base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let token = std::env::var("API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        Ok(Self {
            token,
            ..Self::new(base_url)?
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Join a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
