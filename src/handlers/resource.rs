//! Request/response cycle shared by every resource: parse, validate, run one statement, normalize.

use crate::error::AppError;
use crate::response::{created, deleted, success_many, success_one, Deleted, JsonResponse};
use crate::schema::ResourceSchema;
use crate::service::{RequestValidator, ResourceService};
use crate::sql::{ListParams, ListScope, Patch};
use crate::state::AppState;
use serde_json::Value;
use std::collections::HashMap;

pub fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

pub fn body_to_map(value: Value) -> Result<HashMap<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

pub async fn list(
    state: &AppState,
    resource: &ResourceSchema,
    query: HashMap<String, String>,
    scope: ListScope,
) -> Result<JsonResponse<Vec<Value>>, AppError> {
    let params = ListParams::from_query(query);
    let rows = ResourceService::list(state.store.as_ref(), resource, &params, scope).await?;
    Ok(success_many(rows))
}

pub async fn read(state: &AppState, resource: &ResourceSchema, id_str: &str) -> Result<JsonResponse<Value>, AppError> {
    let id = parse_id(id_str)?;
    let row = ResourceService::get_by_id(state.store.as_ref(), resource, id).await?;
    Ok(success_one(row))
}

/// Validated insert; returns the created row.
pub async fn insert(state: &AppState, resource: &ResourceSchema, body: Value) -> Result<Value, AppError> {
    let body = body_to_map(body)?;
    RequestValidator::validate(resource, &body)?;
    ResourceService::create(state.store.as_ref(), resource, &body).await
}

pub async fn create(state: &AppState, resource: &ResourceSchema, body: Value) -> Result<JsonResponse<Value>, AppError> {
    let row = insert(state, resource, body).await?;
    Ok(created(row))
}

pub async fn update(
    state: &AppState,
    resource: &ResourceSchema,
    id_str: &str,
    body: Value,
) -> Result<JsonResponse<Value>, AppError> {
    let id = parse_id(id_str)?;
    let patch = Patch::from_body(body_to_map(body)?)?;
    RequestValidator::validate(resource, &patch.values)?;
    let row = ResourceService::update(state.store.as_ref(), resource, id, &patch).await?;
    Ok(success_one(row))
}

pub async fn delete(state: &AppState, resource: &ResourceSchema, id_str: &str) -> Result<JsonResponse<Deleted>, AppError> {
    let id = parse_id(id_str)?;
    let removed = ResourceService::delete(state.store.as_ref(), resource, id).await?;
    Ok(deleted(removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("4x"), Err(AppError::BadRequest(_))));
        assert!(parse_id("1 OR 1=1").is_err());
    }

    #[test]
    fn body_must_be_object() {
        assert!(body_to_map(json!({"a": 1})).is_ok());
        assert!(matches!(body_to_map(json!([1, 2])), Err(AppError::BadRequest(_))));
    }
}
