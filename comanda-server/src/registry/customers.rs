//! Customer registry
//!
//! Customers are keyed by their digit-stripped phone number, so the same
//! person is one record however they format their phone. Lifetime counters
//! are updated by [`CustomerRegistry::record_order_completion`], a separate
//! call from order creation; the two are deliberately not atomic.

use std::cmp::Ordering;
use std::sync::Arc;

use shared::models::{Customer, Order};
use shared::util::{self, normalize_phone};
use tokio::sync::broadcast;

use crate::store::{DocumentStore, paths};
use crate::utils::{AppError, AppResult};

use super::Subscription;

pub struct CustomerRegistry {
    store: Arc<dyn DocumentStore>,
}

impl CustomerRegistry {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Register a customer or refresh an existing one.
    ///
    /// An existing record keeps its name and counters; only a non-blank new
    /// address is merged in. A fresh record starts with zeroed counters.
    pub async fn upsert(&self, name: &str, phone: &str, address: &str) -> AppResult<Customer> {
        let phone_key = normalize_phone(phone);
        if phone_key.is_empty() {
            return Err(AppError::validation("phone must contain digits"));
        }

        let now = util::now_rfc3339();
        let customer = match self.fetch_by_key(&phone_key).await? {
            Some(mut existing) => {
                if !address.trim().is_empty() {
                    existing.address = address.to_string();
                }
                existing.last_updated = now;
                existing
            }
            None => Customer {
                phone_key: Some(phone_key.clone()),
                name: name.to_string(),
                phone: phone.to_string(),
                address: address.to_string(),
                created_at: now.clone(),
                last_updated: now,
                last_order_date: None,
                total_orders: 0,
                total_spent: 0.0,
            },
        };

        self.store
            .set(paths::CUSTOMERS, &phone_key, to_document(&customer)?)
            .await?;
        Ok(customer)
    }

    /// Look up a customer by phone in any formatting, `None` when unknown
    pub async fn fetch_by_phone(&self, phone: &str) -> AppResult<Option<Customer>> {
        self.fetch_by_key(&normalize_phone(phone)).await
    }

    async fn fetch_by_key(&self, phone_key: &str) -> AppResult<Option<Customer>> {
        if phone_key.is_empty() {
            return Ok(None);
        }
        match self.store.get(paths::CUSTOMERS, phone_key).await? {
            Some(value) => {
                let mut customer: Customer = from_document(phone_key, value)?;
                customer.phone_key = Some(phone_key.to_string());
                Ok(Some(customer))
            }
            None => Ok(None),
        }
    }

    /// Add one completed order of `amount` to the customer's lifetime stats.
    ///
    /// Unknown customers are silently skipped: stats exist only for
    /// registered customers, and a missed update is accepted rather than
    /// failing the order that triggered it.
    pub async fn record_order_completion(&self, phone: &str, amount: f64) -> AppResult<()> {
        let phone_key = normalize_phone(phone);
        let Some(mut customer) = self.fetch_by_key(&phone_key).await? else {
            tracing::debug!(phone_key = %phone_key, "No customer record for order stats");
            return Ok(());
        };

        customer.total_orders += 1;
        customer.total_spent += amount;
        customer.last_order_date = Some(util::now_rfc3339());

        self.store
            .set(paths::CUSTOMERS, &phone_key, to_document(&customer)?)
            .await?;
        Ok(())
    }

    /// One-shot snapshot of all customers, biggest spenders first
    pub async fn fetch_all(&self) -> AppResult<Vec<Customer>> {
        Self::load_all(&self.store).await
    }

    pub(crate) async fn load_all(store: &Arc<dyn DocumentStore>) -> AppResult<Vec<Customer>> {
        let docs = store.get_all(paths::CUSTOMERS).await?;
        let mut customers = Vec::with_capacity(docs.len());
        for (key, value) in docs {
            let mut customer: Customer = from_document(&key, value)?;
            customer.phone_key = Some(key);
            customers.push(customer);
        }
        customers.sort_by(|a, b| {
            b.total_spent
                .partial_cmp(&a.total_spent)
                .unwrap_or(Ordering::Equal)
        });
        Ok(customers)
    }

    /// All orders ever placed under this phone, newest first.
    ///
    /// This scans the full order collection and filters client-side. Fine
    /// at single-restaurant scale, and the seam to replace with a
    /// server-side index if that stops being true.
    pub async fn fetch_order_history(&self, phone: &str) -> AppResult<Vec<Order>> {
        let phone_key = normalize_phone(phone);
        let docs = self.store.get_all(paths::ORDERS).await?;

        let mut orders = Vec::new();
        for (key, value) in docs {
            let mut order: Order = serde_json::from_value(value)
                .map_err(|e| AppError::database(format!("Corrupt order document {key}: {e}")))?;
            if normalize_phone(&order.customer_phone) == phone_key {
                order.key = Some(key);
                orders.push(order);
            }
        }
        // RFC3339 timestamps sort lexicographically in chronological order
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Deliver the full spend-sorted collection now and after every change
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Vec<Customer>) + Send + Sync + 'static,
    {
        let store = self.store.clone();
        let mut rx = store.subscribe(paths::CUSTOMERS);

        let handle = tokio::spawn(async move {
            deliver(&store, &callback).await;
            loop {
                match rx.recv().await {
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Customer subscriber lagged, resynchronizing");
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
    F: Fn(Vec<Customer>),
{
    match CustomerRegistry::load_all(store).await {
        Ok(customers) => callback(customers),
        Err(e) => tracing::warn!(error = %e, "Customer snapshot load failed"),
    }
}

fn to_document(customer: &Customer) -> AppResult<serde_json::Value> {
    serde_json::to_value(customer).map_err(|e| AppError::internal(e.to_string()))
}

fn from_document(key: &str, value: serde_json::Value) -> AppResult<Customer> {
    serde_json::from_value(value)
        .map_err(|e| AppError::database(format!("Corrupt customer document {key}: {e}")))
}
