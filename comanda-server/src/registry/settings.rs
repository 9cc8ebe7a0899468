//! Settings store
//!
//! Singleton operational settings record. An absent record always reads as
//! [`Settings::default`]; writes are full overwrites.

use std::sync::Arc;

use shared::models::Settings;
use tokio::sync::broadcast;

use crate::store::{DocumentStore, SINGLETON_KEY, paths};
use crate::utils::{AppError, AppResult};

use super::Subscription;

pub struct SettingsStore {
    store: Arc<dyn DocumentStore>,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self) -> AppResult<Settings> {
        Self::load(&self.store).await
    }

    pub(crate) async fn load(store: &Arc<dyn DocumentStore>) -> AppResult<Settings> {
        match store.get(paths::SETTINGS, SINGLETON_KEY).await? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| AppError::database(format!("Corrupt settings document: {e}"))),
            None => Ok(Settings::default()),
        }
    }

    /// Full overwrite of the settings record
    pub async fn set(&self, settings: Settings) -> AppResult<()> {
        let value =
            serde_json::to_value(&settings).map_err(|e| AppError::internal(e.to_string()))?;
        self.store.set(paths::SETTINGS, SINGLETON_KEY, value).await?;
        Ok(())
    }

    /// Deliver the current record now and after every change
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Settings) + Send + Sync + 'static,
    {
        let store = self.store.clone();
        let mut rx = store.subscribe(paths::SETTINGS);

        let handle = tokio::spawn(async move {
            deliver(&store, &callback).await;
            loop {
                match rx.recv().await {
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Settings subscriber lagged, resynchronizing");
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
    F: Fn(Settings),
{
    match SettingsStore::load(store).await {
        Ok(settings) => callback(settings),
        Err(e) => tracing::warn!(error = %e, "Settings snapshot load failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RedbStore;

    #[tokio::test]
    async fn test_absent_record_reads_as_default() {
        let store = SettingsStore::new(Arc::new(RedbStore::open_in_memory().unwrap()));
        assert_eq!(store.get().await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn test_set_is_a_full_overwrite() {
        let store = SettingsStore::new(Arc::new(RedbStore::open_in_memory().unwrap()));

        let mut settings = Settings::default();
        settings.is_open = false;
        settings.delivery_fee = 12.50;
        settings.status_message = "Closed for holidays".to_string();
        store.set(settings.clone()).await.unwrap();

        assert_eq!(store.get().await.unwrap(), settings);
    }
}
