//! End-to-end ordering flow over an in-memory store
//!
//! Drives the registries the way the HTTP layer does: checkout (customer
//! upsert, order create, stats bump), kitchen board transitions, board
//! clearing, and the admin-side customer view.

use std::sync::Arc;

use comanda_server::core::{Config, ServerState};
use comanda_server::store::{DocumentStore, RedbStore};
use shared::models::{OrderDraft, OrderStatus};

fn state() -> ServerState {
    let store: Arc<dyn DocumentStore> = Arc::new(RedbStore::open_in_memory().unwrap());
    ServerState::with_store(Config::from_env(), store)
}

fn draft(phone: &str, total: f64) -> OrderDraft {
    OrderDraft {
        customer: "Ana Souza".to_string(),
        customer_phone: phone.to_string(),
        items: vec!["1x Margherita Pizza".to_string(), "1x Fresh Juice".to_string()],
        total,
        address: "Flower St, 123".to_string(),
        payment_method: "pix".to_string(),
    }
}

#[tokio::test]
async fn checkout_then_kitchen_flow() {
    let state = state();
    let phone = "(11) 98765-4321";

    // Checkout flow: profile upsert, then the order, then the stats bump
    state
        .customers
        .upsert("Ana Souza", phone, "Flower St, 123")
        .await
        .unwrap();
    let order = state.orders.create(draft(phone, 45.00)).await.unwrap();
    state
        .customers
        .record_order_completion(phone, order.total)
        .await
        .unwrap();

    let key = order.key.clone().unwrap();

    // The board sees one pending order with the checkout total
    let board = state.orders.fetch_all().await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].status, OrderStatus::Pending);
    assert_eq!(board[0].total, 45.00);

    // Kitchen walks it forward step by step
    for status in [OrderStatus::Preparing, OrderStatus::Ready, OrderStatus::Completed] {
        state.orders.update_status(&key, status).await.unwrap();
        let board = state.orders.fetch_all().await.unwrap();
        assert_eq!(board[0].status, status);
        assert_eq!(board[0].total, 45.00);
    }

    // Clearing the completed order empties the board
    state.orders.delete(&key).await.unwrap();
    assert!(state.orders.fetch_all().await.unwrap().is_empty());

    // The customer keeps the lifetime stats and the history
    let customer = state
        .customers
        .fetch_by_phone("11987654321")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer.total_orders, 1);
    assert_eq!(customer.total_spent, 45.00);
}

#[tokio::test]
async fn repeat_customer_accumulates_stats_and_history() {
    let state = state();
    let phone = "11987654321";

    state.customers.upsert("Ana", phone, "Flower St").await.unwrap();

    for total in [10.00, 15.50] {
        let order = state.orders.create(draft(phone, total)).await.unwrap();
        state
            .customers
            .record_order_completion(phone, order.total)
            .await
            .unwrap();
    }

    let customer = state.customers.fetch_by_phone(phone).await.unwrap().unwrap();
    assert_eq!(customer.total_orders, 2);
    assert_eq!(customer.total_spent, 25.50);

    // History is scoped to the phone, newest first, and survives formatting
    let history = state
        .customers
        .fetch_order_history("(11) 98765-4321")
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].created_at >= history[1].created_at);

    // An unrelated customer's order stays out of it
    state.orders.create(draft("11900000000", 99.0)).await.unwrap();
    let history = state.customers.fetch_order_history(phone).await.unwrap();
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn menu_seed_and_admin_customer_view() {
    let state = state();

    // Seeding fills the catalogue; deleting one item leaves the rest
    let written = state.menu.seed_defaults().await.unwrap();
    assert!(written > 0);
    let before = state.menu.fetch_all().await.unwrap();
    let victim = before[0].key.clone().unwrap();
    state.menu.delete(&victim).await.unwrap();
    let after = state.menu.fetch_all().await.unwrap();
    assert_eq!(after.len(), before.len() - 1);
    assert!(after.iter().all(|i| i.key.as_deref() != Some(victim.as_str())));

    // Admin view lists customers VIP-first
    for (phone, spent) in [("111", 20.0), ("222", 80.0)] {
        state.customers.upsert("c", phone, "addr").await.unwrap();
        state
            .customers
            .record_order_completion(phone, spent)
            .await
            .unwrap();
    }
    let customers = state.customers.fetch_all().await.unwrap();
    assert_eq!(customers[0].total_spent, 80.0);
    assert_eq!(customers[1].total_spent, 20.0);
}

#[tokio::test]
async fn stream_wakes_on_every_collection_write() {
    let state = state();

    let mut orders_rx = state.store.subscribe("orders");
    let mut settings_rx = state.store.subscribe("settings");

    state.orders.create(draft("111", 12.0)).await.unwrap();
    assert_eq!(orders_rx.recv().await.unwrap().collection, "orders");

    let mut settings = state.settings.get().await.unwrap();
    settings.is_open = false;
    state.settings.set(settings).await.unwrap();
    assert_eq!(settings_rx.recv().await.unwrap().collection, "settings");
}
