//! Success response helpers. Records and lists go out bare; deletes report `{ "deleted": bool }`.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

pub type JsonResponse<T> = (StatusCode, Json<T>);

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct Submitted {
    pub success: bool,
    pub id: Value,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Vec<T>>) {
    (StatusCode::OK, Json(data))
}

pub fn deleted(deleted: bool) -> (StatusCode, Json<Deleted>) {
    (StatusCode::OK, Json(Deleted { deleted }))
}

/// Public form submission acknowledgement: only the new id is echoed back.
pub fn submitted(row: &Value) -> (StatusCode, Json<Submitted>) {
    let id = row.get("id").cloned().unwrap_or(Value::Null);
    (StatusCode::CREATED, Json(Submitted { success: true, id }))
}
