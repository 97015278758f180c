use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::OrderedItem;

// ============================================================================
// Order Aggregate
// ============================================================================
//
// An order is created exactly once, atomically with all of its line items,
// and is immutable afterwards. The total price is fixed at creation time and
// never recomputed on read.
//
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Order {
    /// UUIDv7: time-ordered, so ids sort by creation order.
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub account_id: String,
    pub total_price: f64,
    pub items: Vec<OrderedItem>,
}

impl Order {
    /// Assemble a new order from already-filtered line items.
    ///
    /// Assigns a fresh creation-ordered id, stamps the current UTC time and
    /// fixes the total price as the sum of line totals.
    pub fn new(account_id: impl Into<String>, items: Vec<OrderedItem>) -> Self {
        let total_price = Self::total_of(&items);
        Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            account_id: account_id.into(),
            total_price,
            items,
        }
    }

    /// Sum of unit price times quantity over the given items.
    pub fn total_of(items: &[OrderedItem]) -> f64 {
        items.iter().map(OrderedItem::line_total).sum()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, quantity: u32, unit_price: f64) -> OrderedItem {
        OrderedItem {
            catalog_item_id: id.to_string(),
            quantity,
            name: format!("name-{id}"),
            description: String::new(),
            unit_price,
        }
    }

    #[test]
    fn test_total_is_sum_of_line_totals() {
        let items = vec![item("P1", 2, 10.0), item("P2", 3, 1.5)];
        let order = Order::new("A1", items);

        assert_eq!(order.total_price, 24.5);
        assert_eq!(order.account_id, "A1");
        assert_eq!(order.items.len(), 2);
    }

    #[test]
    fn test_empty_items_total_zero() {
        let order = Order::new("A1", vec![]);
        assert_eq!(order.total_price, 0.0);
    }

    #[test]
    fn test_ids_sort_by_creation_order() {
        let first = Order::new("A1", vec![]);
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = Order::new("A1", vec![]);

        assert!(first.id < second.id);
        assert!(first.id.to_string() < second.id.to_string());
    }

    #[test]
    fn test_order_serialization_round_trip() {
        let order = Order::new("A1", vec![item("P1", 1, 5.0)]);

        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();

        assert_eq!(order, deserialized);
    }
}
