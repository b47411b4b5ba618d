//! Blog posts: public list and lookup, admin CRUD.

use crate::error::AppError;
use crate::extractors::{AdminToken, ApiJson, ApiQuery};
use crate::handlers::resource;
use crate::schema::registry::BLOGS;
use crate::sql::ListScope;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::Value;
use std::collections::HashMap;

/// GET /api/blog?limit=: newest first.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    resource::list(&state, &BLOGS, query, ListScope::Public).await
}

pub async fn read(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse, AppError> {
    resource::read(&state, &BLOGS, &id).await
}

pub async fn admin_list(_: AdminToken, State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    resource::list(&state, &BLOGS, HashMap::new(), ListScope::Admin).await
}

pub async fn create(
    _: AdminToken,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    resource::create(&state, &BLOGS, body).await
}

pub async fn update(
    _: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    resource::update(&state, &BLOGS, &id, body).await
}

pub async fn delete(
    _: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    resource::delete(&state, &BLOGS, &id).await
}
