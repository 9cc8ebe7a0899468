//! Auth API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use shared::models::Role;

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub role: Role,
    pub username: String,
    pub password: String,
}

/// The role token the front-end routes views on. Held only in transient UI
/// state; there is no session to persist or expire.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub role: Role,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let role = state
        .credentials
        .authenticate(payload.role, &payload.username, &payload.password)
        .await?;
    Ok(Json(LoginResponse { role }))
}
