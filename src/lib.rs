//! Showcase API: registry-driven CRUD backend for gallery, events, blog, team and contact content.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use auth::{Authenticator, SharedSecretAuthenticator};
pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use routes::{api_routes, app, common_routes};
pub use schema::{registry, validate_registry, ResourceSchema};
pub use service::ResourceService;
pub use state::AppState;
pub use store::{PgStore, Store};
