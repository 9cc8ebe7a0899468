//! HTTP API
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`auth`] - login
//! - [`orders`] - order management
//! - [`customers`] - customer registry and order history
//! - [`menu`] - menu catalogue
//! - [`settings`] - operational settings
//! - [`credentials`] - login credential management
//! - [`stream`] - WebSocket collection snapshots

pub mod auth;
pub mod credentials;
pub mod customers;
pub mod health;
pub mod menu;
pub mod orders;
pub mod settings;
pub mod stream;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(orders::router())
        .merge(customers::router())
        .merge(menu::router())
        .merge(settings::router())
        .merge(credentials::router())
        .merge(stream::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
