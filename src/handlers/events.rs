//! Events: public list (`upcoming`, `limit`) and lookup, admin CRUD.

use crate::error::AppError;
use crate::extractors::{AdminToken, ApiJson, ApiQuery};
use crate::handlers::resource;
use crate::schema::registry::EVENTS;
use crate::sql::ListScope;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::Value;
use std::collections::HashMap;

/// GET /api/events?upcoming=true&limit=3: ordered by date.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    resource::list(&state, &EVENTS, query, ListScope::Public).await
}

pub async fn read(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse, AppError> {
    resource::read(&state, &EVENTS, &id).await
}

pub async fn admin_list(_: AdminToken, State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    resource::list(&state, &EVENTS, HashMap::new(), ListScope::Admin).await
}

pub async fn create(
    _: AdminToken,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    resource::create(&state, &EVENTS, body).await
}

pub async fn update(
    _: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    resource::update(&state, &EVENTS, &id, body).await
}

pub async fn delete(
    _: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    resource::delete(&state, &EVENTS, &id).await
}
