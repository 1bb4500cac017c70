use thiserror::Error;

use crate::key::QueryKey;

/// Failure converting a value to or from its cached JSON form.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("failed to serialize value for `{key}`: {message}")]
    Serialize { key: QueryKey, message: String },
    #[error("cached value for `{key}` has an unexpected shape: {message}")]
    Deserialize { key: QueryKey, message: String },
}
