//! Order Repository
//!
//! Every read and write is keyed by `(id, workspace_id)`; an order owned by
//! another workspace is indistinguishable from a missing one.

use super::{RepoError, RepoResult};
use shared::models::{
    FulfillmentStatus, Order, OrderItem, OrderStats, OrderStatus, PaymentStatus,
};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};

const ORDER_COLUMNS: &str = "id, workspace_id, store_id, order_number, customer_name, customer_email, customer_phone, customer_address, customer_city, customer_state, customer_zip, customer_country, subtotal, shipping, tax, discount, total, currency, payment_method, status, payment_status, fulfillment_status, paid_at, delivered_at, canceled_at, notes, cancel_reason, tracking_number, tracking_url, source, created_at, updated_at";

const ITEM_COLUMNS: &str =
    "id, order_id, product_id, product_name, product_image, sku, quantity, price, total";

/// Filter for order listings
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub store_id: Option<i64>,
    pub status: Option<OrderStatus>,
    pub limit: i64,
    pub offset: i64,
}

/// Resolved column values for a status update. `None` leaves a column as is.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub fulfillment_status: Option<FulfillmentStatus>,
    pub paid_at: Option<i64>,
    pub delivered_at: Option<i64>,
    pub canceled_at: Option<i64>,
    pub cancel_reason: Option<String>,
    pub notes: Option<String>,
    pub tracking_number: Option<String>,
    pub tracking_url: Option<String>,
}

pub async fn insert<'e>(ex: impl SqliteExecutor<'e>, order: &Order) -> RepoResult<()> {
    sqlx::query(&format!(
        "INSERT INTO orders ({ORDER_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32)"
    ))
    .bind(order.id)
    .bind(order.workspace_id)
    .bind(order.store_id)
    .bind(&order.order_number)
    .bind(&order.customer.name)
    .bind(&order.customer.email)
    .bind(&order.customer.phone)
    .bind(&order.customer.address)
    .bind(&order.customer.city)
    .bind(&order.customer.state)
    .bind(&order.customer.zip)
    .bind(&order.customer.country)
    .bind(order.subtotal)
    .bind(order.shipping)
    .bind(order.tax)
    .bind(order.discount)
    .bind(order.total)
    .bind(&order.currency)
    .bind(&order.payment_method)
    .bind(order.status)
    .bind(order.payment_status)
    .bind(order.fulfillment_status)
    .bind(order.paid_at)
    .bind(order.delivered_at)
    .bind(order.canceled_at)
    .bind(&order.notes)
    .bind(&order.cancel_reason)
    .bind(&order.tracking_number)
    .bind(&order.tracking_url)
    .bind(&order.source)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn insert_item<'e>(ex: impl SqliteExecutor<'e>, item: &OrderItem) -> RepoResult<()> {
    sqlx::query(&format!(
        "INSERT INTO order_items ({ITEM_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
    ))
    .bind(item.id)
    .bind(item.order_id)
    .bind(item.product_id)
    .bind(&item.product_name)
    .bind(&item.product_image)
    .bind(&item.sku)
    .bind(item.quantity)
    .bind(item.price)
    .bind(item.total)
    .execute(ex)
    .await?;
    Ok(())
}

/// Order row without items or store summary
pub async fn find_in_workspace<'e>(
    ex: impl SqliteExecutor<'e>,
    order_id: i64,
    workspace_id: i64,
) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ? AND workspace_id = ?"
    ))
    .bind(order_id)
    .bind(workspace_id)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}

pub async fn find_items<'e>(ex: impl SqliteExecutor<'e>, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let rows = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ? ORDER BY rowid"
    ))
    .bind(order_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Items for a page of orders in one round trip
pub async fn find_items_for_orders(
    pool: &SqlitePool,
    order_ids: &[i64],
) -> RepoResult<Vec<OrderItem>> {
    if order_ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id IN ("
    ));
    let mut separated = qb.separated(", ");
    for id in order_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY rowid");

    let rows = qb.build_query_as::<OrderItem>().fetch_all(pool).await?;
    Ok(rows)
}

/// Newest first, optionally narrowed by store and status
pub async fn list<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
    filter: &OrderFilter,
) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE workspace_id = ?1 AND (?2 IS NULL OR store_id = ?2) AND (?3 IS NULL OR status = ?3) ORDER BY created_at DESC, id DESC LIMIT ?4 OFFSET ?5"
    ))
    .bind(workspace_id)
    .bind(filter.store_id)
    .bind(filter.status)
    .bind(filter.limit)
    .bind(filter.offset)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Write a resolved patch; returns `NotFound` when the order is not owned by
/// the workspace.
pub async fn update<'e>(
    ex: impl SqliteExecutor<'e>,
    order_id: i64,
    workspace_id: i64,
    patch: &OrderPatch,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE orders SET status = COALESCE(?1, status), payment_status = COALESCE(?2, payment_status), fulfillment_status = COALESCE(?3, fulfillment_status), paid_at = COALESCE(?4, paid_at), delivered_at = COALESCE(?5, delivered_at), canceled_at = COALESCE(?6, canceled_at), cancel_reason = COALESCE(?7, cancel_reason), notes = COALESCE(?8, notes), tracking_number = COALESCE(?9, tracking_number), tracking_url = COALESCE(?10, tracking_url), updated_at = ?11 WHERE id = ?12 AND workspace_id = ?13",
    )
    .bind(patch.status)
    .bind(patch.payment_status)
    .bind(patch.fulfillment_status)
    .bind(patch.paid_at)
    .bind(patch.delivered_at)
    .bind(patch.canceled_at)
    .bind(&patch.cancel_reason)
    .bind(&patch.notes)
    .bind(&patch.tracking_number)
    .bind(&patch.tracking_url)
    .bind(now)
    .bind(order_id)
    .bind(workspace_id)
    .execute(ex)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {order_id} not found")));
    }
    Ok(())
}

/// Hard delete; items go with it through ON DELETE CASCADE
pub async fn delete<'e>(
    ex: impl SqliteExecutor<'e>,
    order_id: i64,
    workspace_id: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM orders WHERE id = ? AND workspace_id = ?")
        .bind(order_id)
        .bind(workspace_id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Orders created workspace-wide at or after `since` (quota input)
pub async fn count_created_since<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
    since: i64,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM orders WHERE workspace_id = ? AND created_at >= ?",
    )
    .bind(workspace_id)
    .bind(since)
    .fetch_one(ex)
    .await?;
    Ok(count)
}

pub async fn stats<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
    store_id: Option<i64>,
) -> RepoResult<OrderStats> {
    let row = sqlx::query_as::<_, OrderStats>(
        "SELECT COUNT(*) AS total_orders, COALESCE(SUM(total), 0) AS total_revenue, COALESCE(SUM(CASE WHEN status = 'PENDING' THEN 1 ELSE 0 END), 0) AS pending_orders, COALESCE(SUM(CASE WHEN status = 'COMPLETED' THEN 1 ELSE 0 END), 0) AS completed_orders FROM orders WHERE workspace_id = ?1 AND (?2 IS NULL OR store_id = ?2)",
    )
    .bind(workspace_id)
    .bind(store_id)
    .fetch_one(ex)
    .await?;
    Ok(row)
}
