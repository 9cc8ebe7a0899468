//! Realtime stream API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stream", stream_routes())
}

fn stream_routes() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(handler::orders))
        .route("/customers", get(handler::customers))
        .route("/menu", get(handler::menu))
        .route("/settings", get(handler::settings))
}
