//! Menu registry
//!
//! The menu catalogue: fetch-all, upsert, delete and subscription, plus the
//! one-shot default seeding the admin panel triggers on an empty store.

use std::sync::Arc;

use shared::models::MenuItem;
use tokio::sync::broadcast;

use crate::store::{DocumentStore, paths};
use crate::utils::{AppError, AppResult};

use super::Subscription;

pub struct MenuRegistry {
    store: Arc<dyn DocumentStore>,
}

impl MenuRegistry {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// One-shot snapshot of the catalogue, ordered by numeric ID
    pub async fn fetch_all(&self) -> AppResult<Vec<MenuItem>> {
        Self::load_all(&self.store).await
    }

    pub(crate) async fn load_all(store: &Arc<dyn DocumentStore>) -> AppResult<Vec<MenuItem>> {
        let docs = store.get_all(paths::MENU).await?;
        let mut items = Vec::with_capacity(docs.len());
        for (key, value) in docs {
            let mut item: MenuItem = from_document(&key, value)?;
            item.key = Some(key);
            items.push(item);
        }
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    /// Write one item, keyed by its store key when it has one, otherwise by
    /// its numeric ID. Returns the stored record.
    pub async fn upsert(&self, mut item: MenuItem) -> AppResult<MenuItem> {
        let key = match &item.key {
            Some(key) if !key.is_empty() => key.clone(),
            _ => item.id.to_string(),
        };
        item.key = Some(key.clone());

        self.store
            .set(paths::MENU, &key, to_document(&item)?)
            .await?;
        Ok(item)
    }

    /// Remove one item; other items are untouched, absent keys are a no-op
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        self.store.delete(paths::MENU, key).await?;
        Ok(())
    }

    /// Seed the default catalogue, one write per item.
    ///
    /// Writes are sequential with no rollback: a mid-way failure leaves the
    /// items written so far in place. Returns the number of items written.
    pub async fn seed_defaults(&self) -> AppResult<usize> {
        let catalogue = MenuItem::default_catalogue();
        let mut written = 0;
        for item in catalogue {
            self.upsert(item).await?;
            written += 1;
        }
        tracing::info!(count = written, "Default menu seeded");
        Ok(written)
    }

    /// Deliver the full catalogue now and after every change
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Vec<MenuItem>) + Send + Sync + 'static,
    {
        let store = self.store.clone();
        let mut rx = store.subscribe(paths::MENU);

        let handle = tokio::spawn(async move {
            deliver(&store, &callback).await;
            loop {
                match rx.recv().await {
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Menu subscriber lagged, resynchronizing");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
                deliver(&store, &callback).await;
            }
        });

        Subscription::new(handle)
    }
}

async fn deliver<F>(store: &Arc<dyn DocumentStore>, callback: &F)
where
    F: Fn(Vec<MenuItem>),
{
    match MenuRegistry::load_all(store).await {
        Ok(items) => callback(items),
        Err(e) => tracing::warn!(error = %e, "Menu snapshot load failed"),
    }
}

fn to_document(item: &MenuItem) -> AppResult<serde_json::Value> {
    serde_json::to_value(item).map_err(|e| AppError::internal(e.to_string()))
}

fn from_document(key: &str, value: serde_json::Value) -> AppResult<MenuItem> {
    serde_json::from_value(value)
        .map_err(|e| AppError::database(format!("Corrupt menu document {key}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RedbStore;

    fn registry() -> MenuRegistry {
        MenuRegistry::new(Arc::new(RedbStore::open_in_memory().unwrap()))
    }

    fn item(id: i64, name: &str) -> MenuItem {
        MenuItem {
            key: None,
            id,
            name: name.to_string(),
            description: String::new(),
            price: 10.0,
            category: "Sides".to_string(),
            image: String::new(),
            available: true,
        }
    }

    #[tokio::test]
    async fn test_upsert_keys_by_id_when_no_key_given() {
        let registry = registry();
        let stored = registry.upsert(item(7, "Fries")).await.unwrap();
        assert_eq!(stored.key.as_deref(), Some("7"));

        // Same ID overwrites in place
        let mut renamed = item(7, "Large Fries");
        renamed.key = stored.key.clone();
        registry.upsert(renamed).await.unwrap();

        let all = registry.fetch_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Large Fries");
    }

    #[tokio::test]
    async fn test_delete_removes_only_the_target() {
        let registry = registry();
        registry.upsert(item(1, "Fries")).await.unwrap();
        registry.upsert(item(2, "Soda")).await.unwrap();

        registry.delete("1").await.unwrap();

        let all = registry.fetch_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Soda");

        // Absent key is a no-op
        registry.delete("1").await.unwrap();
    }

    #[tokio::test]
    async fn test_seed_defaults_writes_the_whole_catalogue() {
        let registry = registry();
        let written = registry.seed_defaults().await.unwrap();

        let all = registry.fetch_all().await.unwrap();
        assert_eq!(all.len(), written);
        // Ordered by ID
        let ids: Vec<i64> = all.iter().map(|i| i.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }
}
