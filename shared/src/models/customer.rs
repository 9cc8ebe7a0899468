//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity
///
/// Keyed in the store by the digit-stripped phone number; `phone` keeps the
/// formatting the customer typed. `total_orders` and `total_spent` are
/// lifetime counters, only ever incremented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Store key (digit-stripped phone), attached when the record is read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_key: Option<String>,
    pub name: String,
    pub phone: String,
    pub address: String,
    /// RFC3339 creation timestamp
    pub created_at: String,
    /// RFC3339 timestamp of the last profile update
    pub last_updated: String,
    /// RFC3339 timestamp of the last recorded order, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_order_date: Option<String>,
    #[serde(default)]
    pub total_orders: u32,
    /// Lifetime spend in currency unit
    #[serde(default)]
    pub total_spent: f64,
}
