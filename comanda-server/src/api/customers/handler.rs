//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use shared::models::{Customer, Order};

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/customers - all customers, biggest spenders first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Customer>>> {
    Ok(Json(state.customers.fetch_all().await?))
}

#[derive(Debug, Deserialize)]
pub struct RegisterCustomer {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// POST /api/customers - register or refresh a customer
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterCustomer>,
) -> AppResult<Json<Customer>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    Ok(Json(
        state
            .customers
            .upsert(&payload.name, &payload.phone, &payload.address)
            .await?,
    ))
}

/// GET /api/customers/:phone - lookup in any phone formatting
pub async fn get_by_phone(
    State(state): State<ServerState>,
    Path(phone): Path<String>,
) -> AppResult<Json<Customer>> {
    let customer = state
        .customers
        .fetch_by_phone(&phone)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {phone}")))?;
    Ok(Json(customer))
}

#[derive(Debug, Deserialize)]
pub struct StatsUpdate {
    pub amount: f64,
}

/// POST /api/customers/:phone/stats - add one completed order to the
/// lifetime counters
pub async fn record_stats(
    State(state): State<ServerState>,
    Path(phone): Path<String>,
    Json(payload): Json<StatsUpdate>,
) -> AppResult<Json<Customer>> {
    validate_non_negative(payload.amount, "amount")?;

    state
        .customers
        .record_order_completion(&phone, payload.amount)
        .await?;

    let customer = state
        .customers
        .fetch_by_phone(&phone)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {phone}")))?;
    Ok(Json(customer))
}

/// GET /api/customers/:phone/orders - full order history, newest first
pub async fn order_history(
    State(state): State<ServerState>,
    Path(phone): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.customers.fetch_order_history(&phone).await?))
}
