//! Generic CRUD over a registry resource. Every operation issues exactly one statement.

use crate::error::AppError;
use crate::schema::ResourceSchema;
use crate::sql::{delete, filtered_select, insert, partial_update, select_by_id, ListParams, ListScope, Patch};
use crate::store::Store;
use serde_json::Value;
use std::collections::HashMap;

pub struct ResourceService;

impl ResourceService {
    /// List rows with the resource's declared filters, ordering and a clamped limit.
    pub async fn list(
        store: &dyn Store,
        resource: &ResourceSchema,
        params: &ListParams,
        scope: ListScope,
    ) -> Result<Vec<Value>, AppError> {
        let q = filtered_select(resource, params, scope);
        let rows = store.fetch_all(&q).await?;
        tracing::debug!(resource = resource.name, count = rows.len(), "listed");
        Ok(rows)
    }

    /// Fetch one row by id.
    pub async fn get_by_id(store: &dyn Store, resource: &ResourceSchema, id: i64) -> Result<Value, AppError> {
        let q = select_by_id(resource, id)?;
        store
            .fetch_optional(&q)
            .await?
            .ok_or_else(|| AppError::NotFound("not found".into()))
    }

    /// Insert one row; required fields are checked before anything reaches the store.
    pub async fn create(
        store: &dyn Store,
        resource: &ResourceSchema,
        body: &HashMap<String, Value>,
    ) -> Result<Value, AppError> {
        let q = insert(resource, body)?;
        let row = store
            .fetch_optional(&q)
            .await?
            .ok_or(AppError::Store(sqlx::Error::RowNotFound))?;
        tracing::info!(resource = resource.name, id = ?row.get("id"), "created");
        Ok(row)
    }

    /// Partial update by id. Zero returned rows is a not-found, never a success.
    pub async fn update(
        store: &dyn Store,
        resource: &ResourceSchema,
        id: i64,
        patch: &Patch,
    ) -> Result<Value, AppError> {
        let q = partial_update(resource, id, patch)?;
        let row = store
            .fetch_optional(&q)
            .await?
            .ok_or_else(|| AppError::NotFound("not found".into()))?;
        tracing::info!(resource = resource.name, id, "updated");
        Ok(row)
    }

    /// Delete by id. Returns whether a row was removed; a missing id is not an error.
    pub async fn delete(store: &dyn Store, resource: &ResourceSchema, id: i64) -> Result<bool, AppError> {
        let q = delete(resource, id)?;
        let affected = store.execute(&q).await?;
        tracing::info!(resource = resource.name, id, deleted = affected > 0, "delete");
        Ok(affected > 0)
    }
}
