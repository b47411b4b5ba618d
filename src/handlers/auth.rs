//! Admin login: exchange the password for the admin token.

use crate::error::AppError;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<Value>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Password from a login body. Anything but a JSON object with a string `password`
/// yields an empty candidate, which never matches.
fn password_of(body: &[u8]) -> String {
    match serde_json::from_slice::<LoginRequest>(body) {
        Ok(LoginRequest {
            password: Some(Value::String(s)),
        }) => s,
        _ => String::new(),
    }
}

/// POST /api/admin/login. The body is read leniently: a bad or missing password is a 401, never a 4xx parse error.
pub async fn login(State(state): State<AppState>, body: Bytes) -> Result<Json<LoginResponse>, AppError> {
    let token = state.auth.login(&password_of(&body))?;
    tracing::info!("admin login");
    Ok(Json(LoginResponse { token }))
}
