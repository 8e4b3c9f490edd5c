//! Order Lifecycle Manager
//!
//! Creation runs as one SQLite transaction:
//!
//! 1. resolve the store under the workspace
//! 2. check the monthly order quota
//! 3. resolve and price every line, checking stock
//! 4. compute the total
//! 5. reserve the order number
//! 6. insert the order and its items
//! 7. conditionally decrement tracked stock
//! 8. bump the store counters
//!
//! Any error drops the transaction, which rolls every write back.

use std::collections::HashMap;

use serde::Deserialize;
use shared::models::{
    FulfillmentStatus, Order, OrderCreate, OrderItem, OrderStats, OrderStatus, OrderUpdate,
    PaymentStatus, StoreSummary,
};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

use super::error::{OrderError, OrderResult};
use super::number::next_order_number;
use super::pricing::{OrderTotals, line_total};
use crate::db::repository::order::{OrderFilter, OrderPatch};
use crate::db::repository::{RepoError, order as order_repo, product as product_repo};
use crate::db::repository::{store as store_repo, workspace as workspace_repo};
use crate::{db, quota};
use crate::validation;

const DEFAULT_SOURCE: &str = "manual";
const DEFAULT_PER_PAGE: i64 = 20;
const MAX_PER_PAGE: i64 = 100;

/// Listing filter and paging
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    pub store_id: Option<i64>,
    pub status: Option<OrderStatus>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl OrderListQuery {
    fn to_filter(&self) -> OrderFilter {
        let per_page = self
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        let page = self.page.unwrap_or(1).max(1);
        OrderFilter {
            store_id: self.store_id,
            status: self.status,
            limit: per_page,
            offset: (page - 1).saturating_mul(per_page),
        }
    }
}

/// A tracked line waiting for its stock decrement
struct StockClaim {
    product_id: i64,
    product_name: String,
    quantity: i64,
}

/// Apply the timestamp derivation rules to a partial update.
///
/// Explicit timestamps always win. Otherwise PAID stamps `paid_at`,
/// FULFILLED stamps `delivered_at` and CANCELED stamps `canceled_at`.
/// The three rules are independent.
pub fn resolve_patch(update: OrderUpdate, now: i64) -> OrderPatch {
    let paid_at = update
        .paid_at
        .or_else(|| (update.payment_status == Some(PaymentStatus::Paid)).then_some(now));
    let delivered_at = update.delivered_at.or_else(|| {
        (update.fulfillment_status == Some(FulfillmentStatus::Fulfilled)).then_some(now)
    });
    let canceled_at = update
        .canceled_at
        .or_else(|| (update.status == Some(OrderStatus::Canceled)).then_some(now));

    OrderPatch {
        status: update.status,
        payment_status: update.payment_status,
        fulfillment_status: update.fulfillment_status,
        paid_at,
        delivered_at,
        canceled_at,
        cancel_reason: update.cancel_reason,
        notes: update.notes,
        tracking_number: update.tracking_number,
        tracking_url: update.tracking_url,
    }
}

/// Orchestrates order writes for all workspaces. Holds no per-request state.
#[derive(Clone)]
pub struct OrderManager {
    pool: SqlitePool,
}

impl OrderManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an order with all of its items atomically
    pub async fn create(
        &self,
        workspace_id: i64,
        input: OrderCreate,
        now: i64,
    ) -> OrderResult<Order> {
        validation::check(&input).map_err(OrderError::Validation)?;

        let mut tx = db::begin_write(&self.pool).await?;

        let store = store_repo::find_in_workspace(&mut *tx, input.store_id, workspace_id)
            .await?
            .ok_or(OrderError::StoreNotFound(input.store_id))?;

        let plan = workspace_repo::find_plan(&mut *tx, workspace_id)
            .await?
            .ok_or(OrderError::PlanNotFound(workspace_id))?;
        let used =
            order_repo::count_created_since(&mut *tx, workspace_id, quota::month_start(now))
                .await?;
        quota::check_order_quota(&plan, used)?;

        let order_id = snowflake_id();
        let mut items = Vec::with_capacity(input.items.len());
        let mut claims = Vec::new();
        for line in &input.items {
            let product = product_repo::find_in_store(&mut *tx, line.product_id, store.id)
                .await?
                .ok_or(OrderError::ProductNotFound(line.product_id))?;

            if product.track_inventory && product.stock < line.quantity {
                return Err(OrderError::InsufficientStock {
                    product_name: product.name,
                    available: product.stock,
                    requested: line.quantity,
                });
            }

            let total = line_total(line.price, line.quantity).map_err(OrderError::Validation)?;
            if product.track_inventory {
                claims.push(StockClaim {
                    product_id: product.id,
                    product_name: product.name.clone(),
                    quantity: line.quantity,
                });
            }
            items.push(OrderItem {
                id: snowflake_id(),
                order_id,
                product_id: product.id,
                product_name: product.name,
                product_image: product.image,
                sku: product.sku,
                quantity: line.quantity,
                price: line.price,
                total,
            });
        }

        let totals = OrderTotals::compute(
            items.iter().map(|i| i.total),
            input.shipping,
            input.tax,
            input.discount,
        )
        .map_err(OrderError::Validation)?;
        if totals.total < 0 {
            tracing::warn!(
                workspace_id,
                store_id = store.id,
                total = totals.total,
                discount = totals.discount,
                "Order total is negative"
            );
        }

        let order_number = next_order_number(&mut *tx, now).await?;

        let order = Order {
            id: order_id,
            workspace_id,
            store_id: store.id,
            order_number,
            customer: input.customer,
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            tax: totals.tax,
            discount: totals.discount,
            total: totals.total,
            currency: store.currency.clone(),
            payment_method: input.payment_method,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            fulfillment_status: FulfillmentStatus::Unfulfilled,
            paid_at: None,
            delivered_at: None,
            canceled_at: None,
            notes: input.notes,
            cancel_reason: None,
            tracking_number: None,
            tracking_url: None,
            source: input.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            created_at: now,
            updated_at: now,
            items: Vec::new(),
            store: None,
        };
        order_repo::insert(&mut *tx, &order).await?;
        for item in &items {
            order_repo::insert_item(&mut *tx, item).await?;
        }

        for claim in &claims {
            let applied =
                product_repo::decrement_stock(&mut *tx, claim.product_id, store.id, claim.quantity, now)
                    .await?;
            if !applied {
                // Stock moved since the line was read (or the same product
                // appears on several lines). Report what is left now.
                let available = product_repo::find_in_store(&mut *tx, claim.product_id, store.id)
                    .await?
                    .map(|p| p.stock)
                    .unwrap_or(0);
                return Err(OrderError::InsufficientStock {
                    product_name: claim.product_name.clone(),
                    available,
                    requested: claim.quantity,
                });
            }
        }

        store_repo::increment_counters(&mut *tx, store.id, totals.total, now).await?;

        tx.commit().await?;

        tracing::info!(
            order_id = order.id,
            order_number = %order.order_number,
            workspace_id,
            store_id = store.id,
            items = items.len(),
            total = order.total,
            "Order created"
        );

        Ok(Order {
            items,
            store: Some(StoreSummary {
                id: store.id,
                name: store.name,
                currency: store.currency,
            }),
            ..order
        })
    }

    /// Fully-loaded order, `OrderNotFound` across workspaces
    pub async fn get(&self, workspace_id: i64, order_id: i64) -> OrderResult<Order> {
        let mut order = order_repo::find_in_workspace(&self.pool, order_id, workspace_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;
        order.items = order_repo::find_items(&self.pool, order.id).await?;
        order.store = store_repo::find_summary(&self.pool, order.store_id).await?;
        Ok(order)
    }

    /// Newest first, with items and store summary attached
    pub async fn list(&self, workspace_id: i64, query: &OrderListQuery) -> OrderResult<Vec<Order>> {
        if let Some(store_id) = query.store_id {
            self.ensure_store(workspace_id, store_id).await?;
        }

        let mut orders = order_repo::list(&self.pool, workspace_id, &query.to_filter()).await?;

        let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        let mut items_by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for item in order_repo::find_items_for_orders(&self.pool, &ids).await? {
            items_by_order.entry(item.order_id).or_default().push(item);
        }
        let stores: HashMap<i64, StoreSummary> =
            store_repo::find_summaries_in_workspace(&self.pool, workspace_id)
                .await?
                .into_iter()
                .map(|s| (s.id, s))
                .collect();

        for order in &mut orders {
            order.items = items_by_order.remove(&order.id).unwrap_or_default();
            order.store = stores.get(&order.store_id).cloned();
        }
        Ok(orders)
    }

    /// Partial status / tracking update with timestamp derivation
    pub async fn update(
        &self,
        workspace_id: i64,
        order_id: i64,
        update: OrderUpdate,
        now: i64,
    ) -> OrderResult<Order> {
        let patch = resolve_patch(update, now);
        order_repo::update(&self.pool, order_id, workspace_id, &patch, now)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => OrderError::OrderNotFound(order_id),
                other => other.into(),
            })?;

        tracing::info!(
            order_id,
            workspace_id,
            status = ?patch.status,
            payment_status = ?patch.payment_status,
            fulfillment_status = ?patch.fulfillment_status,
            "Order updated"
        );

        self.get(workspace_id, order_id).await
    }

    /// Hard delete. Stock and store counters are not restored.
    pub async fn delete(&self, workspace_id: i64, order_id: i64) -> OrderResult<()> {
        if !order_repo::delete(&self.pool, order_id, workspace_id).await? {
            return Err(OrderError::OrderNotFound(order_id));
        }
        tracing::info!(order_id, workspace_id, "Order deleted");
        Ok(())
    }

    pub async fn stats(&self, workspace_id: i64, store_id: Option<i64>) -> OrderResult<OrderStats> {
        if let Some(store_id) = store_id {
            self.ensure_store(workspace_id, store_id).await?;
        }
        Ok(order_repo::stats(&self.pool, workspace_id, store_id).await?)
    }

    async fn ensure_store(&self, workspace_id: i64, store_id: i64) -> OrderResult<()> {
        store_repo::find_in_workspace(&self.pool, store_id, workspace_id)
            .await?
            .ok_or(OrderError::StoreNotFound(store_id))?;
        Ok(())
    }
}
