use std::time::Duration;

use async_trait::async_trait;

use crate::domain::order::Order;

// ============================================================================
// Order Store - Durable Storage of Orders and Their Line Items
// ============================================================================
//
// Owns the relational shape of an order: one header row plus N line-item
// rows, written together or not at all, and read back as fully nested
// aggregates.
//
// ============================================================================

mod postgres;

pub use postgres::PgOrderStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database operation timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist the order header and all of its line items atomically.
    ///
    /// On any failure the whole write rolls back; a partial order is never
    /// visible to readers. An order with zero line items is a degenerate but
    /// valid write (header row, empty item set).
    async fn write(&self, order: &Order) -> Result<(), StoreError>;

    /// All orders for the account, ascending by order id, each with its
    /// nested line items. An account with no orders yields an empty list.
    async fn read_by_account(&self, account_id: &str) -> Result<Vec<Order>, StoreError>;
}
