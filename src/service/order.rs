use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::order::{Order, OrderError, OrderedItem, RequestedItem};
use crate::lookup::{AccountLookup, CatalogItem, CatalogLookup};
use crate::store::OrderStore;

// ============================================================================
// Order Service - Cross-Service Orchestration
// ============================================================================
//
// Turns a raw order request into a priced, validated, persisted order by
// querying the account and catalog services, and reads orders back with
// line items re-enriched from live catalog data.
//
// All dependencies are handed in at construction time so tests can
// substitute doubles. No sub-call is ever retried here: every failure is
// surfaced to the caller, and a write only happens after all reads
// succeeded, so nothing ever needs compensating.
//
// ============================================================================

#[derive(Clone)]
pub struct OrderService {
    accounts: Arc<dyn AccountLookup>,
    catalog: Arc<dyn CatalogLookup>,
    store: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(
        accounts: Arc<dyn AccountLookup>,
        catalog: Arc<dyn CatalogLookup>,
        store: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            accounts,
            catalog,
            store,
        }
    }

    /// Create and persist a new order for the account.
    ///
    /// Requested entries whose catalog id cannot be resolved, or whose
    /// quantity is zero, are silently dropped. Line items keep the order of
    /// the request; for duplicate catalog ids the first occurrence wins.
    pub async fn create_order(
        &self,
        account_id: &str,
        requested: Vec<RequestedItem>,
    ) -> Result<Order, OrderError> {
        let account = self
            .accounts
            .account_by_id(account_id)
            .await
            .map_err(OrderError::AccountUnavailable)?;

        if account.is_none() {
            return Err(OrderError::AccountNotFound {
                account_id: account_id.to_string(),
            });
        }

        if requested.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let ids = distinct_ids(requested.iter().map(|r| r.catalog_item_id.as_str()));
        let resolved = self
            .catalog
            .items_by_ids(&ids)
            .await
            .map_err(OrderError::CatalogUnavailable)?;

        let by_id: HashMap<&str, &CatalogItem> =
            resolved.iter().map(|c| (c.id.as_str(), c)).collect();

        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for entry in &requested {
            if !seen.insert(entry.catalog_item_id.as_str()) {
                continue;
            }
            if entry.quantity == 0 {
                continue;
            }
            let Some(catalog_item) = by_id.get(entry.catalog_item_id.as_str()) else {
                continue;
            };
            items.push(OrderedItem {
                catalog_item_id: catalog_item.id.clone(),
                quantity: entry.quantity,
                name: catalog_item.name.clone(),
                description: catalog_item.description.clone(),
                unit_price: catalog_item.unit_price,
            });
        }

        if items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let order = Order::new(account_id, items);
        self.store.write(&order).await?;

        tracing::info!(
            order_id = %order.id,
            account_id = %order.account_id,
            item_count = order.items.len(),
            total_price = order.total_price,
            "order created"
        );

        Ok(order)
    }

    /// All orders for the account, ascending by order id, with each line
    /// item's name, description and price refreshed from the catalog.
    ///
    /// The catalog is queried once for the distinct union of all referenced
    /// ids, not per order. Ids the catalog no longer knows keep their stored
    /// snapshot; quantity and id are never touched.
    pub async fn orders_for_account(&self, account_id: &str) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.store.read_by_account(account_id).await?;

        let ids = distinct_ids(
            orders
                .iter()
                .flat_map(|o| o.items.iter())
                .map(|i| i.catalog_item_id.as_str()),
        );
        if ids.is_empty() {
            return Ok(orders);
        }

        let resolved = self
            .catalog
            .items_by_ids(&ids)
            .await
            .map_err(OrderError::CatalogUnavailable)?;

        let by_id: HashMap<&str, &CatalogItem> =
            resolved.iter().map(|c| (c.id.as_str(), c)).collect();

        for order in &mut orders {
            for item in &mut order.items {
                if let Some(live) = by_id.get(item.catalog_item_id.as_str()) {
                    item.name = live.name.clone();
                    item.description = live.description.clone();
                    item.unit_price = live.unit_price;
                }
            }
        }

        tracing::debug!(
            account_id = %account_id,
            order_count = orders.len(),
            catalog_ids = ids.len(),
            "orders listed"
        );

        Ok(orders)
    }
}

/// Distinct ids in first-appearance order.
fn distinct_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for id in ids {
        if seen.insert(id) {
            out.push(id.to_string());
        }
    }
    out
}

// ============================================================================
// Unit Tests
// ============================================================================
