//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use shared::models::MenuItem;
use shared::util;

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TEXT_LEN, validate_positive, validate_required_text,
};
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/menu - the whole catalogue
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.menu.fetch_all().await?))
}

/// Menu item payload; `key`/`id` absent means "new item"
#[derive(Debug, Deserialize)]
pub struct UpsertMenuItem {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub available: Option<bool>,
}

/// POST /api/menu - create or overwrite an item
///
/// The price check lives here, at the form boundary; the registry itself
/// writes whatever it is given.
pub async fn upsert(
    State(state): State<ServerState>,
    Json(payload): Json<UpsertMenuItem>,
) -> AppResult<Json<MenuItem>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_positive(payload.price, "price")?;
    if payload.description.len() > MAX_TEXT_LEN {
        return Err(crate::utils::AppError::validation("description is too long"));
    }

    let item = MenuItem {
        key: payload.key,
        id: payload.id.unwrap_or_else(util::next_id),
        name: payload.name,
        description: payload.description,
        price: payload.price,
        category: payload.category,
        image: payload.image,
        available: payload.available.unwrap_or(true),
    };

    Ok(Json(state.menu.upsert(item).await?))
}

/// DELETE /api/menu/:key - remove one item
pub async fn remove(
    State(state): State<ServerState>,
    Path(key): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    state.menu.delete(&key).await?;
    Ok(ok(()))
}

/// POST /api/menu/seed - write the default catalogue, one item per write
pub async fn seed_defaults(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<usize>>> {
    let written = state.menu.seed_defaults().await?;
    Ok(ok(written))
}
