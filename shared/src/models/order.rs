//! Order Model

use serde::{Deserialize, Serialize};

/// Order status
///
/// Orders move forward through exactly one path:
/// pending → preparing → ready → completed.
/// An order may additionally be removed while `pending` (customer cancel)
/// or while `completed` (cleared from the board).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
}

impl OrderStatus {
    /// The single allowed forward transition, if any
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    /// Whether moving from `self` to `to` is a legal transition
    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        self.next() == Some(to)
    }

    /// Whether an order in this status may be removed from the registry
    /// (cancel while pending, clear after completion)
    pub fn is_removable(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Completed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
        }
    }
}

/// Order entity
///
/// `items` holds display lines ("2x Margherita Pizza"); the total is
/// computed once at creation and never reconciled against the lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Store key, attached when the record is read or created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Timestamp-derived numeric ID
    pub id: i64,
    pub customer: String,
    pub customer_phone: String,
    pub items: Vec<String>,
    pub status: OrderStatus,
    /// Wall-clock time ("HH:MM") shown on the kitchen board
    pub time: String,
    /// Total amount in currency unit
    pub total: f64,
    pub address: String,
    pub payment_method: String,
    /// RFC3339 creation timestamp
    pub created_at: String,
}

/// Create order payload: everything the registry does not assign itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer: String,
    pub customer_phone: String,
    pub items: Vec<String>,
    /// Total amount in currency unit
    pub total: f64,
    pub address: String,
    pub payment_method: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_only() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Completed));

        // Skipping a step or moving backwards is never legal
        assert!(!Pending.can_transition_to(Ready));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Ready.can_transition_to(Preparing));
        assert!(!Preparing.can_transition_to(Preparing));
    }

    #[test]
    fn test_removable_states() {
        use OrderStatus::*;
        assert!(Pending.is_removable());
        assert!(Completed.is_removable());
        assert!(!Preparing.is_removable());
        assert!(!Ready.is_removable());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"preparing\"");
        let back: OrderStatus = serde_json::from_str("\"ready\"").unwrap();
        assert_eq!(back, OrderStatus::Ready);
    }
}
