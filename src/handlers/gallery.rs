//! Gallery images (public list by category, admin CRUD) and read-only categories.

use crate::error::AppError;
use crate::extractors::{AdminToken, ApiJson, ApiQuery};
use crate::handlers::resource;
use crate::schema::registry::{GALLERY_CATEGORIES, GALLERY_IMAGES};
use crate::sql::ListScope;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::Value;
use std::collections::HashMap;

/// GET /api/gallery/categories: `all` first, then by title.
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    resource::list(&state, &GALLERY_CATEGORIES, HashMap::new(), ListScope::Public).await
}

/// GET /api/gallery/images?category=
pub async fn list_images(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    resource::list(&state, &GALLERY_IMAGES, query, ListScope::Public).await
}

pub async fn admin_list(_: AdminToken, State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    resource::list(&state, &GALLERY_IMAGES, HashMap::new(), ListScope::Admin).await
}

pub async fn create(
    _: AdminToken,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    resource::create(&state, &GALLERY_IMAGES, body).await
}

pub async fn update(
    _: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    resource::update(&state, &GALLERY_IMAGES, &id, body).await
}

pub async fn delete(
    _: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    resource::delete(&state, &GALLERY_IMAGES, &id).await
}
