//! Settings API Handlers

use axum::{Json, extract::State};

use shared::models::Settings;

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/settings - current record, defaults when absent
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<Settings>> {
    Ok(Json(state.settings.get().await?))
}

/// PUT /api/settings - full overwrite
pub async fn set(
    State(state): State<ServerState>,
    Json(settings): Json<Settings>,
) -> AppResult<Json<Settings>> {
    state.settings.set(settings.clone()).await?;
    Ok(Json(settings))
}
