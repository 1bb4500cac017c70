//! Records returned by the Fellowship API.

mod bootstrap;
mod profile;
mod role;
mod user;

pub use bootstrap::{BootstrapResponse, CreatedFlags};
pub use profile::ProfileRecord;
pub use role::RoleRecord;
pub use user::UserRecord;
