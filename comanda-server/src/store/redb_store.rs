//! redb-backed document store
//!
//! One table holds every collection, keyed `(collection, key)` with
//! JSON-serialized documents as values. redb commits with
//! `Durability::Immediate` by default, so a returned write is on disk.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde_json::Value;
use tokio::sync::broadcast;

use super::{ChangeHub, DocumentStore, StoreChange, StoreResult};

/// Table for all documents: key = (collection, key), value = JSON bytes
const DOCUMENTS_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("documents");

/// Document store backed by redb
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
    hub: Arc<ChangeHub>,
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::with_database(db)
    }

    /// Open an in-memory database (tests, ephemeral runs)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::with_database(db)
    }

    fn with_database(db: Database) -> StoreResult<Self> {
        // Create the table up front so first reads see an empty table
        // instead of a missing one
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(DOCUMENTS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            hub: Arc::new(ChangeHub::new()),
        })
    }

    /// Current revision of a collection (0 if never written)
    pub fn revision(&self, collection: &str) -> u64 {
        self.hub.revision(collection)
    }
}

#[async_trait]
impl DocumentStore for RedbStore {
    async fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Value>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DOCUMENTS_TABLE)?;

        match table.get((collection, key))? {
            Some(guard) => {
                let value: Value = serde_json::from_slice(guard.value())?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn get_all(&self, collection: &str) -> StoreResult<Vec<(String, Value)>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DOCUMENTS_TABLE)?;

        let mut documents = Vec::new();
        for result in table.range((collection, "")..)? {
            let (guard, value) = result?;
            let (coll, key) = guard.value();
            if coll != collection {
                break;
            }
            let document: Value = serde_json::from_slice(value.value())?;
            documents.push((key.to_string(), document));
        }

        Ok(documents)
    }

    async fn set(&self, collection: &str, key: &str, value: Value) -> StoreResult<()> {
        let bytes = serde_json::to_vec(&value)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(DOCUMENTS_TABLE)?;
            table.insert((collection, key), bytes.as_slice())?;
        }
        write_txn.commit()?;

        self.hub.notify(collection);
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> StoreResult<()> {
        let removed = {
            let write_txn = self.db.begin_write()?;
            let removed = {
                let mut table = write_txn.open_table(DOCUMENTS_TABLE)?;
                table.remove((collection, key))?.is_some()
            };
            write_txn.commit()?;
            removed
        };

        // Deleting an absent key changes nothing, so nobody is woken
        if removed {
            self.hub.notify(collection);
        }
        Ok(())
    }

    fn subscribe(&self, collection: &str) -> broadcast::Receiver<StoreChange> {
        self.hub.subscribe(collection)
    }
}
