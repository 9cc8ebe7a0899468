//! New-order notifier
//!
//! Watches the order collection and announces every newly arrived pending
//! order, honoring the sound toggle from the settings record. The kitchen
//! and admin views pick the announcement up from the realtime stream; this
//! service is the server-side half of "a bell rings when an order lands".

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use shared::models::OrderStatus;

use crate::registry::{OrderRegistry, SettingsStore, Subscription};

/// Running notifier; both watches stop when this is dropped
pub struct OrderNotifier {
    _orders_sub: Subscription,
    _settings_sub: Subscription,
}

impl OrderNotifier {
    pub fn start(orders: &OrderRegistry, settings: &SettingsStore) -> Self {
        let sound_enabled = Arc::new(AtomicBool::new(true));

        let settings_sub = settings.subscribe({
            let sound_enabled = sound_enabled.clone();
            move |settings| {
                sound_enabled.store(settings.sound_enabled, Ordering::Relaxed);
            }
        });

        // Highest pending order ID already announced; -1 until the initial
        // snapshot sets the baseline so a restart does not re-announce the
        // whole backlog
        let highest_seen = Arc::new(AtomicI64::new(-1));

        let orders_sub = orders.subscribe({
            let highest_seen = highest_seen.clone();
            let sound_enabled = sound_enabled.clone();
            move |orders| {
                let max_pending = orders
                    .iter()
                    .filter(|o| o.status == OrderStatus::Pending)
                    .map(|o| o.id)
                    .max()
                    .unwrap_or(0);

                let prev = highest_seen.load(Ordering::Relaxed);
                if prev < 0 {
                    highest_seen.store(max_pending, Ordering::Relaxed);
                    return;
                }
                if max_pending > prev {
                    highest_seen.store(max_pending, Ordering::Relaxed);
                    tracing::info!(
                        order_id = max_pending,
                        sound = sound_enabled.load(Ordering::Relaxed),
                        "New pending order received"
                    );
                }
            }
        });

        Self {
            _orders_sub: orders_sub,
            _settings_sub: settings_sub,
        }
    }
}
