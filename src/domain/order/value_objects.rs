use serde::{Deserialize, Serialize};

// ============================================================================
// Order Value Objects
// ============================================================================

/// A single catalog position on a raw create-order request.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RequestedItem {
    pub catalog_item_id: String,
    pub quantity: u32,
}

/// A priced line item as it lives on a persisted order.
///
/// Name, description and unit price are a snapshot of the catalog entry at
/// creation time. The list-orders path overwrites them with live catalog data
/// in the response; quantity and id are never touched.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderedItem {
    pub catalog_item_id: String,
    pub quantity: u32,
    pub name: String,
    pub description: String,
    pub unit_price: f64,
}

impl OrderedItem {
    /// Price contribution of this line: unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
