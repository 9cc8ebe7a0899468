//! Comanda Server - restaurant ordering service node
//!
//! # Architecture overview
//!
//! Everything the public menu, kitchen board, admin panel and customer
//! registry need, behind one small HTTP/WebSocket surface:
//!
//! - **Document store** (`store`): keyed JSON documents over redb, with
//!   per-collection change subscription
//! - **Registries** (`registry`): orders, customers, menu, settings and
//!   credentials; key assignment, sorting and the order status rules
//! - **HTTP API** (`api`): RESTful routes plus WebSocket snapshot streams
//! - **Services** (`services`): background watchers (new-order notifier)
//!
//! # Module structure
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # configuration, state, HTTP server
//! ├── store/         # document store trait + redb backend
//! ├── registry/      # one registry per entity type
//! ├── services/      # background watchers
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod core;
pub mod registry;
pub mod services;
pub mod store;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use crate::registry::{
    CredentialStore, CustomerRegistry, MenuRegistry, OrderRegistry, SettingsStore, Subscription,
};
pub use crate::store::{DocumentStore, RedbStore, StoreChange, StoreError};
pub use crate::utils::logger::{init_logger, init_logger_with_file};
pub use crate::utils::{AppError, AppResult};

pub fn print_banner() {
    println!(
        r#"
   ______                                 __
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
