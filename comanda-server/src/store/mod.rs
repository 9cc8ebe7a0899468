//! Document store abstraction
//!
//! The registries never talk to a concrete database: they go through
//! [`DocumentStore`], a minimal keyed-document interface (get / get_all /
//! set / delete / subscribe). Swapping the persistence backend means
//! implementing this one trait.
//!
//! Change notification is snapshot-based: every committed write bumps a
//! per-collection revision and wakes subscribers, who re-read the full
//! collection. No diffs are delivered.

mod redb_store;

pub use redb_store::RedbStore;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::broadcast;

/// Logical collection names
pub mod paths {
    pub const ORDERS: &str = "orders";
    pub const CUSTOMERS: &str = "customers";
    pub const MENU: &str = "menu";
    pub const SETTINGS: &str = "settings";
    pub const CREDENTIALS: &str = "passwords";
}

/// Key under which singleton records (settings, passwords) are stored
pub const SINGLETON_KEY: &str = "singleton";

/// Broadcast channel capacity per collection, enough to absorb bursts;
/// lagged subscribers resynchronize with a full snapshot anyway
const CHANGE_CAPACITY: usize = 256;

/// A committed change in one collection
#[derive(Debug, Clone)]
pub struct StoreChange {
    pub collection: String,
    /// Monotonically increasing per collection
    pub revision: u64,
}

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed JSON document store with per-collection change subscription
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Read one document, `None` when absent
    async fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Value>>;

    /// Read a whole collection as `(key, document)` pairs, key order
    async fn get_all(&self, collection: &str) -> StoreResult<Vec<(String, Value)>>;

    /// Write (create or overwrite) one document
    async fn set(&self, collection: &str, key: &str, value: Value) -> StoreResult<()>;

    /// Remove one document; removing an absent key is a no-op
    async fn delete(&self, collection: &str, key: &str) -> StoreResult<()>;

    /// Subscribe to committed changes in one collection
    fn subscribe(&self, collection: &str) -> broadcast::Receiver<StoreChange>;
}

/// Per-collection revision counters plus change fan-out
///
/// Backends call [`ChangeHub::notify`] after every committed mutation.
#[derive(Debug, Default)]
pub struct ChangeHub {
    revisions: DashMap<String, u64>,
    channels: DashMap<String, broadcast::Sender<StoreChange>>,
}

impl ChangeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current revision of a collection (0 if never written)
    pub fn revision(&self, collection: &str) -> u64 {
        self.revisions.get(collection).map(|v| *v).unwrap_or(0)
    }

    /// Bump the revision and wake all subscribers of the collection
    pub fn notify(&self, collection: &str) {
        let revision = {
            let mut entry = self.revisions.entry(collection.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };

        if let Some(tx) = self.channels.get(collection) {
            // No receivers is fine: nobody is watching this collection yet
            let _ = tx.send(StoreChange {
                collection: collection.to_string(),
                revision,
            });
        }
    }

    pub fn subscribe(&self, collection: &str) -> broadcast::Receiver<StoreChange> {
        self.channels
            .entry(collection.to_string())
            .or_insert_with(|| broadcast::channel(CHANGE_CAPACITY).0)
            .subscribe()
    }
}
