pub mod config;
pub mod key;
pub mod query;

mod cache;
mod error;

pub use cache::{CacheWriter, QueryCache};
pub use config::FellowshipConfig;
pub use error::CacheError;
pub use key::QueryKey;
pub use query::{QueryOptions, QueryPolicy, QueryResult, QuerySource, QueryTrigger, RefetchOn};
