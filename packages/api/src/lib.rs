//! # API crate — session data for the Fellowship client
//!
//! Everything a screen needs to know about the signed-in member comes from one
//! `POST /api/bootstrap` round trip. This crate owns that round trip and what
//! happens to its result:
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`models`] | — | User, profile, role and bootstrap response records |
//! | [`auth`] | — | Auth status reported by the sign-in collaborator |
//! | [`repository`] | — | Network capabilities (`BootstrapRepository`, `MeRepository`) |
//! | [`bootstrap`] | — | Seeding function, coordinator, readiness gate |
//! | [`consumers`] | — | Role and profile queries that read the seeded cache |
//! | [`tabs`] | — | Role-derived tab visibility |
//! | [`http`] / [`config`] | `http` | `reqwest` implementation of the repositories and its env config |
//!
//! Nothing here renders; the `ui` crate wraps these types in Dioxus hooks.

pub mod auth;
pub mod bootstrap;
#[cfg(feature = "http")]
pub mod config;
pub mod consumers;
mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod models;
pub mod repository;
pub mod tabs;

pub use auth::AuthStatus;
pub use bootstrap::{seed, BootstrapCoordinator, BootstrapGate, BootstrapTask};
#[cfg(feature = "http")]
pub use config::ApiConfig;
pub use consumers::MeQueries;
pub use error::{ApiError, BootstrapError};
#[cfg(feature = "http")]
pub use http::HttpClient;
pub use models::{BootstrapResponse, CreatedFlags, ProfileRecord, RoleRecord, UserRecord};
pub use repository::{BootstrapRepository, MeRepository};
pub use tabs::{Tab, TabVisibility};
