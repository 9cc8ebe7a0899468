//! Shared types for the Comanda ordering system
//!
//! Plain data models and small utilities used by the server crate.
//! No I/O lives here.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Credentials, CredentialsUpdate, Customer, MenuItem, Order, OrderDraft, OrderStatus, Role,
    Settings,
};
