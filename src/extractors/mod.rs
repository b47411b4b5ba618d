pub mod admin;
pub mod json;

pub use admin::{AdminToken, ADMIN_TOKEN_HEADER};
pub use json::{ApiJson, ApiQuery};
