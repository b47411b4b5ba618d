//! Contact form: public submission, admin inbox and removal.

use crate::error::AppError;
use crate::extractors::{AdminToken, ApiJson};
use crate::handlers::resource;
use crate::response::submitted;
use crate::schema::registry::CONTACT_MESSAGES;
use crate::sql::ListScope;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::Value;
use std::collections::HashMap;

/// POST /api/contact: returns `{ success, id }` rather than echoing the message.
pub async fn submit(State(state): State<AppState>, ApiJson(body): ApiJson<Value>) -> Result<impl IntoResponse, AppError> {
    let row = resource::insert(&state, &CONTACT_MESSAGES, body).await?;
    Ok(submitted(&row))
}

pub async fn admin_list(_: AdminToken, State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    resource::list(&state, &CONTACT_MESSAGES, HashMap::new(), ListScope::Admin).await
}

pub async fn delete(
    _: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    resource::delete(&state, &CONTACT_MESSAGES, &id).await
}
