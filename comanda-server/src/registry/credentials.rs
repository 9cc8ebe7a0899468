//! Credential store and login check
//!
//! Singleton record holding the username/password pair for each of the two
//! fixed roles. Login is a plain equality check against this record; no
//! hashing and no lockout. The update path re-reads the current
//! record to retain passwords that were left blank; if two admins save at
//! the same moment the later write wins, which is accepted at this scale.

use std::sync::Arc;

use shared::models::{Credentials, CredentialsUpdate, Role};

use crate::store::{DocumentStore, SINGLETON_KEY, paths};
use crate::utils::{AppError, AppResult};

pub struct CredentialStore {
    store: Arc<dyn DocumentStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self) -> AppResult<Credentials> {
        match self.store.get(paths::CREDENTIALS, SINGLETON_KEY).await? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| AppError::database(format!("Corrupt credentials document: {e}"))),
            None => Ok(Credentials::default()),
        }
    }

    /// Apply an update and return the stored record.
    ///
    /// Usernames are always overwritten; a password is overwritten only when
    /// a non-empty new value was supplied.
    pub async fn set(&self, update: CredentialsUpdate) -> AppResult<Credentials> {
        let current = self.get().await?;
        let updated = current.apply(update);

        let value =
            serde_json::to_value(&updated).map_err(|e| AppError::internal(e.to_string()))?;
        self.store
            .set(paths::CREDENTIALS, SINGLETON_KEY, value)
            .await?;

        tracing::info!("Credentials updated");
        Ok(updated)
    }

    /// Check a login attempt; success yields the role for view routing
    pub async fn authenticate(
        &self,
        role: Role,
        username: &str,
        password: &str,
    ) -> AppResult<Role> {
        let credentials = self.get().await?;
        if credentials.matches(role, username, password) {
            tracing::info!(role = role.as_str(), "Login succeeded");
            Ok(role)
        } else {
            tracing::info!(role = role.as_str(), "Login rejected");
            Err(AppError::invalid_credentials())
        }
    }
}
