//! Customer API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", customer_routes())
}

fn customer_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::register))
        .route("/{phone}", get(handler::get_by_phone))
        .route("/{phone}/stats", post(handler::record_stats))
        .route("/{phone}/orders", get(handler::order_history))
}
