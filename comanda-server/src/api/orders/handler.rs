//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use shared::models::{Order, OrderDraft, OrderStatus};

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative,
    validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// GET /api/orders - full snapshot, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.fetch_all().await?))
}

/// Checkout payload
#[derive(Debug, Deserialize)]
pub struct CreateOrder {
    pub customer: String,
    pub customer_phone: String,
    pub items: Vec<String>,
    pub total: f64,
    pub address: String,
    pub payment_method: String,
}

/// POST /api/orders - place an order
///
/// Runs the checkout flow: customer profile upsert, then the order write,
/// then the lifetime stats bump. The three writes are independent; a stats
/// failure is logged but does not undo the already-placed order.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrder>,
) -> AppResult<Json<Order>> {
    validate_required_text(&payload.customer, "customer", MAX_NAME_LEN)?;
    validate_required_text(&payload.customer_phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&payload.payment_method, "payment method", MAX_SHORT_TEXT_LEN)?;
    validate_non_negative(payload.total, "total")?;
    if payload.items.is_empty() {
        return Err(AppError::validation("order must contain at least one item"));
    }

    state
        .customers
        .upsert(&payload.customer, &payload.customer_phone, &payload.address)
        .await?;

    let order = state
        .orders
        .create(OrderDraft {
            customer: payload.customer,
            customer_phone: payload.customer_phone.clone(),
            items: payload.items,
            total: payload.total,
            address: payload.address,
            payment_method: payload.payment_method,
        })
        .await?;

    if let Err(e) = state
        .customers
        .record_order_completion(&payload.customer_phone, order.total)
        .await
    {
        tracing::warn!(
            error = %e,
            order_id = order.id,
            "Customer stats update failed after order creation"
        );
    }

    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// PUT /api/orders/:key/status - move an order along the board
pub async fn update_status(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders.update_status(&key, payload.status).await?))
}

/// DELETE /api/orders/:key - cancel a pending order or clear a completed one
pub async fn remove(
    State(state): State<ServerState>,
    Path(key): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    state.orders.delete(&key).await?;
    Ok(ok(()))
}
