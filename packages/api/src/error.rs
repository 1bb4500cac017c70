//! Error types.
//!
//! Both enums are `Clone`: a single bootstrap attempt is awaited by every
//! screen that asked for it, and each of them receives the same error.

use store::CacheError;
use thiserror::Error;

/// Failure talking to the Fellowship API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("invalid API configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Failure of a session bootstrap attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    #[error("bootstrap request failed: {0}")]
    Network(#[from] ApiError),
    #[error("malformed bootstrap response: {0}")]
    MalformedResponse(String),
    #[error("could not seed cache: {0}")]
    Cache(#[from] CacheError),
    #[error("session ended before the bootstrap response arrived")]
    Superseded,
}
