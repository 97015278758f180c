use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::order::{Order, OrderedItem};

use super::{OrderStore, StoreError};

// ============================================================================
// Postgres Order Store
// ============================================================================
//
// Write path: one transaction per order. The header insert and a single
// bulk line-item insert (UNNEST over parallel arrays, not N round trips)
// commit together; the transaction guard rolls back on drop if anything
// fails before commit.
//
// Read path: one LEFT JOIN query ordered by order id, flattened to one row
// per (order, line item) pair, then folded back into nested aggregates by
// detecting order-id boundaries in the row stream.
//
// ============================================================================

const INSERT_ORDER: &str = "\
INSERT INTO orders (id, created_at, account_id, total_price) \
VALUES ($1, $2, $3, $4)";

const INSERT_ITEMS: &str = "\
INSERT INTO order_items (order_id, catalog_item_id, quantity, name, description, unit_price) \
SELECT $1, t.catalog_item_id, t.quantity, t.name, t.description, t.unit_price \
FROM UNNEST($2::text[], $3::bigint[], $4::text[], $5::text[], $6::float8[]) \
     AS t(catalog_item_id, quantity, name, description, unit_price)";

const SELECT_BY_ACCOUNT: &str = "\
SELECT o.id, o.created_at, o.account_id, o.total_price, \
       i.catalog_item_id, i.quantity, i.name, i.description, i.unit_price \
FROM orders o \
LEFT JOIN order_items i ON i.order_id = o.id \
WHERE o.account_id = $1 \
ORDER BY o.id";

pub struct PgOrderStore {
    pool: PgPool,
    /// Deadline applied to every store call so a stalled database cannot
    /// hang the caller indefinitely.
    op_timeout: Duration,
}

impl PgOrderStore {
    pub fn new(pool: PgPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    async fn with_deadline<T, F>(&self, operation: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.op_timeout, operation).await {
            Ok(result) => result.map_err(StoreError::Database),
            Err(_) => Err(StoreError::Timeout(self.op_timeout)),
        }
    }

    async fn write_in_tx(pool: &PgPool, order: &Order) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(INSERT_ORDER)
            .bind(order.id)
            .bind(order.created_at)
            .bind(&order.account_id)
            .bind(order.total_price)
            .execute(&mut *tx)
            .await?;

        if !order.items.is_empty() {
            let mut ids = Vec::with_capacity(order.items.len());
            let mut quantities = Vec::with_capacity(order.items.len());
            let mut names = Vec::with_capacity(order.items.len());
            let mut descriptions = Vec::with_capacity(order.items.len());
            let mut unit_prices = Vec::with_capacity(order.items.len());

            for item in &order.items {
                ids.push(item.catalog_item_id.clone());
                quantities.push(i64::from(item.quantity));
                names.push(item.name.clone());
                descriptions.push(item.description.clone());
                unit_prices.push(item.unit_price);
            }

            sqlx::query(INSERT_ITEMS)
                .bind(order.id)
                .bind(ids)
                .bind(quantities)
                .bind(names)
                .bind(descriptions)
                .bind(unit_prices)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn write(&self, order: &Order) -> Result<(), StoreError> {
        self.with_deadline(Self::write_in_tx(&self.pool, order))
            .await?;

        tracing::debug!(
            order_id = %order.id,
            account_id = %order.account_id,
            item_count = order.items.len(),
            "persisted order"
        );

        Ok(())
    }

    async fn read_by_account(&self, account_id: &str) -> Result<Vec<Order>, StoreError> {
        let rows: Vec<OrderRow> = self
            .with_deadline(
                sqlx::query_as(SELECT_BY_ACCOUNT)
                    .bind(account_id)
                    .fetch_all(&self.pool),
            )
            .await?;

        Ok(fold_rows(rows))
    }
}

// ============================================================================
// Flat-to-Nested Reconstruction
// ============================================================================

/// One row of the LEFT JOIN result set.
///
/// The line-item columns are null when the join found no items for the
/// order, so they all come back optional.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    created_at: DateTime<Utc>,
    account_id: String,
    total_price: f64,
    catalog_item_id: Option<String>,
    quantity: Option<i64>,
    name: Option<String>,
    description: Option<String>,
    unit_price: Option<f64>,
}

/// Fold the ordered flat row stream back into nested orders.
///
/// Single pass: keep the order currently being assembled, flush it whenever
/// the incoming row carries a different order id, and flush the final
/// in-progress order after the last row. An order whose join columns are all
/// null still appears exactly once, with an empty item list.
fn fold_rows(rows: Vec<OrderRow>) -> Vec<Order> {
    let mut orders = Vec::new();
    let mut current: Option<Order> = None;

    for row in rows {
        let is_boundary = current.as_ref().map(|o| o.id) != Some(row.id);
        if is_boundary {
            if let Some(done) = current.take() {
                orders.push(done);
            }
            current = Some(Order {
                id: row.id,
                created_at: row.created_at,
                account_id: row.account_id,
                total_price: row.total_price,
                items: Vec::new(),
            });
        }

        if let (Some(order), Some(catalog_item_id)) = (current.as_mut(), row.catalog_item_id) {
            order.items.push(OrderedItem {
                catalog_item_id,
                quantity: row.quantity.unwrap_or(0).max(0) as u32,
                name: row.name.unwrap_or_default(),
                description: row.description.unwrap_or_default(),
                unit_price: row.unit_price.unwrap_or(0.0),
            });
        }
    }

    if let Some(done) = current.take() {
        orders.push(done);
    }

    orders
}

// ============================================================================
// Unit Tests
// ============================================================================
