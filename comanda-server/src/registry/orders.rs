//! Order registry
//!
//! Create / status update / delete / fetch / subscribe over the `orders`
//! collection. The status state machine is enforced here: the store itself
//! stays last-write-wins, but no write leaves this registry unless the
//! transition is legal.

use std::sync::Arc;

use shared::models::{Order, OrderDraft, OrderStatus};
use shared::util;
use tokio::sync::broadcast;

use crate::store::{DocumentStore, paths};
use crate::utils::{AppError, AppResult};

use super::Subscription;

pub struct OrderRegistry {
    store: Arc<dyn DocumentStore>,
}

impl OrderRegistry {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a new order in `pending` status and return the stored record.
    ///
    /// The registry assigns the numeric ID and timestamps; there is no
    /// duplicate detection, so two rapid submissions create two orders.
    pub async fn create(&self, draft: OrderDraft) -> AppResult<Order> {
        let key = uuid::Uuid::new_v4().to_string();
        let order = Order {
            key: Some(key.clone()),
            id: util::next_id(),
            customer: draft.customer,
            customer_phone: draft.customer_phone,
            items: draft.items,
            status: OrderStatus::Pending,
            time: util::clock_time(),
            total: draft.total,
            address: draft.address,
            payment_method: draft.payment_method,
            created_at: util::now_rfc3339(),
        };

        self.store
            .set(paths::ORDERS, &key, to_document(&order)?)
            .await?;

        tracing::info!(order_id = order.id, total = order.total, "Order created");
        Ok(order)
    }

    /// Read one order, `None` when absent
    pub async fn fetch(&self, key: &str) -> AppResult<Option<Order>> {
        match self.store.get(paths::ORDERS, key).await? {
            Some(value) => {
                let mut order: Order = from_document(key, value)?;
                order.key = Some(key.to_string());
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// Move an order to a new status.
    ///
    /// Only the single forward step is accepted
    /// (pending → preparing → ready → completed); anything else is rejected
    /// before a write happens.
    pub async fn update_status(&self, key: &str, new_status: OrderStatus) -> AppResult<Order> {
        let mut order = self
            .fetch(key)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {key}")))?;

        if !order.status.can_transition_to(new_status) {
            return Err(AppError::business_rule(format!(
                "Order {} cannot move from {} to {}",
                order.id,
                order.status.as_str(),
                new_status.as_str()
            )));
        }

        order.status = new_status;
        self.store
            .set(paths::ORDERS, key, to_document(&order)?)
            .await?;

        tracing::info!(order_id = order.id, status = new_status.as_str(), "Order status updated");
        Ok(order)
    }

    /// Remove an order.
    ///
    /// Allowed only while `pending` (customer cancel) or once `completed`
    /// (cleared from the board). Removing an absent key is a no-op.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let Some(order) = self.fetch(key).await? else {
            return Ok(());
        };

        if !order.status.is_removable() {
            return Err(AppError::business_rule(format!(
                "Order {} is {} and cannot be removed",
                order.id,
                order.status.as_str()
            )));
        }

        self.store.delete(paths::ORDERS, key).await?;
        tracing::info!(order_id = order.id, "Order removed");
        Ok(())
    }

    /// One-shot snapshot of all orders, newest first (descending numeric ID)
    pub async fn fetch_all(&self) -> AppResult<Vec<Order>> {
        Self::load_all(&self.store).await
    }

    pub(crate) async fn load_all(store: &Arc<dyn DocumentStore>) -> AppResult<Vec<Order>> {
        let docs = store.get_all(paths::ORDERS).await?;
        let mut orders = Vec::with_capacity(docs.len());
        for (key, value) in docs {
            let mut order: Order = from_document(&key, value)?;
            order.key = Some(key);
            orders.push(order);
        }
        orders.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(orders)
    }

    /// Deliver the full sorted collection now and after every change.
    ///
    /// Delivery stops when the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Vec<Order>) + Send + Sync + 'static,
    {
        let store = self.store.clone();
        let mut rx = store.subscribe(paths::ORDERS);

        let handle = tokio::spawn(async move {
            deliver(&store, &callback).await;
            loop {
                match rx.recv().await {
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Order subscriber lagged, resynchronizing");
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
    F: Fn(Vec<Order>),
{
    match OrderRegistry::load_all(store).await {
        Ok(orders) => callback(orders),
        Err(e) => tracing::warn!(error = %e, "Order snapshot load failed"),
    }
}

fn to_document(order: &Order) -> AppResult<serde_json::Value> {
    serde_json::to_value(order).map_err(|e| AppError::internal(e.to_string()))
}

fn from_document(key: &str, value: serde_json::Value) -> AppResult<Order> {
    serde_json::from_value(value)
        .map_err(|e| AppError::database(format!("Corrupt order document {key}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RedbStore;

    fn registry() -> OrderRegistry {
        let store = Arc::new(RedbStore::open_in_memory().unwrap());
        OrderRegistry::new(store)
    }

    fn draft(total: f64) -> OrderDraft {
        OrderDraft {
            customer: "Ana Souza".to_string(),
            customer_phone: "(11) 98765-4321".to_string(),
            items: vec!["1x Margherita Pizza".to_string(), "2x Soda Can".to_string()],
            total,
            address: "Flower St, 123".to_string(),
            payment_method: "pix".to_string(),
        }
    }

    #[tokio::test]
    async fn test_order_lifecycle() {
        let registry = registry();

        let order = registry.create(draft(45.00)).await.unwrap();
        let key = order.key.clone().unwrap();

        let all = registry.fetch_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, OrderStatus::Pending);
        assert_eq!(all[0].total, 45.00);

        let updated = registry
            .update_status(&key, OrderStatus::Preparing)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Preparing);

        let all = registry.fetch_all().await.unwrap();
        assert_eq!(all[0].status, OrderStatus::Preparing);
        assert_eq!(all[0].total, 45.00);

        registry.update_status(&key, OrderStatus::Ready).await.unwrap();
        registry
            .update_status(&key, OrderStatus::Completed)
            .await
            .unwrap();

        registry.delete(&key).await.unwrap();
        assert!(registry.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_sorts_by_descending_id() {
        let store: Arc<dyn DocumentStore> = Arc::new(RedbStore::open_in_memory().unwrap());
        let registry = OrderRegistry::new(store.clone());

        // Write records with explicit IDs to pin the expected order
        for (key, id) in [("a", 3i64), ("b", 1), ("c", 2)] {
            let mut order = Order {
                key: None,
                id,
                customer: "x".to_string(),
                customer_phone: String::new(),
                items: vec![],
                status: OrderStatus::Pending,
                time: "10:00".to_string(),
                total: 1.0,
                address: String::new(),
                payment_method: "cash".to_string(),
                created_at: shared::util::now_rfc3339(),
            };
            order.key = Some(key.to_string());
            store
                .set(paths::ORDERS, key, serde_json::to_value(&order).unwrap())
                .await
                .unwrap();
        }

        let ids: Vec<i64> = registry
            .fetch_all()
            .await
            .unwrap()
            .iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_illegal_transitions_are_rejected() {
        let registry = registry();
        let order = registry.create(draft(10.0)).await.unwrap();
        let key = order.key.unwrap();

        // Skipping ahead from pending
        let err = registry
            .update_status(&key, OrderStatus::Ready)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));

        registry
            .update_status(&key, OrderStatus::Preparing)
            .await
            .unwrap();
        registry.update_status(&key, OrderStatus::Ready).await.unwrap();
        registry
            .update_status(&key, OrderStatus::Completed)
            .await
            .unwrap();

        // Backwards from completed
        let err = registry
            .update_status(&key, OrderStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_delete_is_gated_by_status() {
        let registry = registry();
        let order = registry.create(draft(10.0)).await.unwrap();
        let key = order.key.unwrap();

        registry
            .update_status(&key, OrderStatus::Preparing)
            .await
            .unwrap();

        // In-flight orders cannot be removed
        let err = registry.delete(&key).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));

        registry.update_status(&key, OrderStatus::Ready).await.unwrap();
        registry
            .update_status(&key, OrderStatus::Completed)
            .await
            .unwrap();
        registry.delete(&key).await.unwrap();

        // Cancel while pending is allowed
        let order = registry.create(draft(5.0)).await.unwrap();
        registry.delete(&order.key.unwrap()).await.unwrap();
        assert!(registry.fetch_all().await.unwrap().is_empty());

        // Absent key is a no-op
        registry.delete("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_update_status_on_missing_order() {
        let registry = registry();
        let err = registry
            .update_status("missing", OrderStatus::Preparing)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_subscribe_delivers_initial_and_change_snapshots() {
        let registry = registry();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        let sub = registry.subscribe(move |orders| {
            let _ = tx.send(orders.len());
        });

        // Initial snapshot of the empty collection
        assert_eq!(rx.recv().await, Some(0));

        registry.create(draft(20.0)).await.unwrap();
        assert_eq!(rx.recv().await, Some(1));

        // After disposal nothing more is delivered
        drop(sub);
        registry.create(draft(30.0)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
    }
}
