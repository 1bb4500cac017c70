//! # HTTP transport
//!
//! [`HttpClient`] implements [`BootstrapRepository`] and [`MeRepository`] with
//! `reqwest`. Clones share one connection pool and one token slot, so signing
//! in or out through any clone affects all of them.
//!
//! | Call | Endpoint |
//! |------|----------|
//! | bootstrap | `POST /api/bootstrap` |
//! | profile | `GET /api/me/profile` |
//! | roles | `GET /api/me/roles` |
//!
//! Responses may be bare JSON or wrapped as `{ "data": ... }`.

use std::sync::{Arc, RwLock};

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{BootstrapResponse, ProfileRecord, RoleRecord};
use crate::repository::{BootstrapRepository, MeRepository};

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    config: Arc<ApiConfig>,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: Arc::new(RwLock::new(config.token.clone())),
            config: Arc::new(config),
        }
    }

    /// Replace the bearer token. `None` after sign-out.
    pub fn set_token(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.config.url(path));
        let token = self
            .token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T, ApiError> {
        tracing::debug!(%method, path, "api request");
        let response = self
            .request(method, path)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    let value: Value = serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
    serde_json::from_value(unwrap_envelope(value)).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Strip a `{ "data": ... }` envelope if present.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Best-effort human message from an error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "message"]
                .iter()
                .find_map(|field| value.get(field)?.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

impl BootstrapRepository for HttpClient {
    async fn post(&self) -> Result<BootstrapResponse, ApiError> {
        self.send(Method::POST, "/api/bootstrap").await
    }
}

impl MeRepository for HttpClient {
    async fn profile(&self) -> Result<Option<ProfileRecord>, ApiError> {
        self.send(Method::GET, "/api/me/profile").await
    }

    async fn roles(&self) -> Result<Vec<RoleRecord>, ApiError> {
        self.send(Method::GET, "/api/me/roles").await
    }
}
