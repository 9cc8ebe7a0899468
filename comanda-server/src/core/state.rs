//! Server state
//!
//! `ServerState` holds the shared references every handler needs: the
//! document store and the five registries over it. It is constructed once
//! at startup and cloned freely (all fields are `Arc`-backed), so nothing
//! here is a module-level singleton; tests build their own state over an
//! in-memory store.

use std::sync::Arc;

use crate::core::Config;
use crate::registry::{
    CredentialStore, CustomerRegistry, MenuRegistry, OrderRegistry, SettingsStore,
};
use crate::services::OrderNotifier;
use crate::store::{DocumentStore, RedbStore};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub orders: Arc<OrderRegistry>,
    pub customers: Arc<CustomerRegistry>,
    pub menu: Arc<MenuRegistry>,
    pub settings: Arc<SettingsStore>,
    pub credentials: Arc<CredentialStore>,
}

impl ServerState {
    /// Open the on-disk store under the configured work directory and wire
    /// up the registries
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            AppError::internal(format!(
                "Failed to create work dir {}: {e}",
                config.work_dir
            ))
        })?;

        let store = RedbStore::open(config.store_path())?;
        tracing::info!(path = %config.store_path().display(), "Document store opened");

        Ok(Self::with_store(config.clone(), Arc::new(store)))
    }

    /// Build state over an existing store (tests use an in-memory one)
    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config,
            orders: Arc::new(OrderRegistry::new(store.clone())),
            customers: Arc::new(CustomerRegistry::new(store.clone())),
            menu: Arc::new(MenuRegistry::new(store.clone())),
            settings: Arc::new(SettingsStore::new(store.clone())),
            credentials: Arc::new(CredentialStore::new(store.clone())),
            store,
        }
    }

    /// Start the background watchers; they run until the handle is dropped
    pub fn start_background_tasks(&self) -> OrderNotifier {
        OrderNotifier::start(&self.orders, &self.settings)
    }
}
