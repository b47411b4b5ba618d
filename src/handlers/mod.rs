//! HTTP handlers, one module per resource on top of the shared request cycle.

pub mod auth;
pub mod blog;
pub mod contact;
pub mod events;
pub mod gallery;
pub mod resource;
pub mod team;
