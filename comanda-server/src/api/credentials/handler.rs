//! Credential API Handlers

use axum::{Json, extract::State};

use shared::models::{Credentials, CredentialsUpdate};

use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text};

/// GET /api/credentials - current record, defaults when absent
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<Credentials>> {
    Ok(Json(state.credentials.get().await?))
}

/// PUT /api/credentials - update usernames and any supplied passwords.
/// Blank passwords keep their current value.
pub async fn set(
    State(state): State<ServerState>,
    Json(update): Json<CredentialsUpdate>,
) -> AppResult<Json<Credentials>> {
    validate_required_text(&update.admin_username, "admin username", MAX_NAME_LEN)?;
    validate_required_text(&update.kitchen_username, "kitchen username", MAX_NAME_LEN)?;
    for password in [&update.admin_password, &update.kitchen_password]
        .into_iter()
        .flatten()
    {
        if password.len() > MAX_PASSWORD_LEN {
            return Err(crate::utils::AppError::validation("password is too long"));
        }
    }

    Ok(Json(state.credentials.set(update).await?))
}
