//! Read-only analytics queries
//!
//! All queries are scoped to a workspace and take an optional store filter
//! bound as `(?2 IS NULL OR store_id = ?2)`.

use super::RepoResult;
use shared::models::{OrderStatus, PaymentStatus, RecentOrder, TopCustomer, TopProduct};
use sqlx::SqliteExecutor;

/// Minimal order projection for time bucketing
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderPoint {
    pub created_at: i64,
    pub total: i64,
    pub payment_status: PaymentStatus,
}

/// Per-store counters joined with the product count
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreTotals {
    pub id: i64,
    pub name: String,
    pub total_orders: i64,
    pub total_revenue: i64,
    pub product_count: i64,
}

pub async fn count_stores<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
    store_id: Option<i64>,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM stores WHERE workspace_id = ?1 AND (?2 IS NULL OR id = ?2)",
    )
    .bind(workspace_id)
    .bind(store_id)
    .fetch_one(ex)
    .await?;
    Ok(count)
}

pub async fn count_products<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
    store_id: Option<i64>,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM products p JOIN stores s ON s.id = p.store_id WHERE s.workspace_id = ?1 AND (?2 IS NULL OR p.store_id = ?2)",
    )
    .bind(workspace_id)
    .bind(store_id)
    .fetch_one(ex)
    .await?;
    Ok(count)
}

/// `(order count, paid revenue)` for orders created in `[from, to)`.
/// Open bounds are passed as `None`.
pub async fn order_totals<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
    store_id: Option<i64>,
    from: Option<i64>,
    to: Option<i64>,
) -> RepoResult<(i64, i64)> {
    let row = sqlx::query_as::<_, (i64, i64)>(
        "SELECT COUNT(*), COALESCE(SUM(CASE WHEN payment_status = 'PAID' THEN total ELSE 0 END), 0) FROM orders WHERE workspace_id = ?1 AND (?2 IS NULL OR store_id = ?2) AND (?3 IS NULL OR created_at >= ?3) AND (?4 IS NULL OR created_at < ?4)",
    )
    .bind(workspace_id)
    .bind(store_id)
    .bind(from)
    .bind(to)
    .fetch_one(ex)
    .await?;
    Ok(row)
}

/// Orders created in `[from, to)`, oldest first
pub async fn order_points<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
    store_id: Option<i64>,
    from: i64,
    to: i64,
) -> RepoResult<Vec<OrderPoint>> {
    let rows = sqlx::query_as::<_, OrderPoint>(
        "SELECT created_at, total, payment_status FROM orders WHERE workspace_id = ?1 AND (?2 IS NULL OR store_id = ?2) AND created_at >= ?3 AND created_at < ?4 ORDER BY created_at",
    )
    .bind(workspace_id)
    .bind(store_id)
    .bind(from)
    .bind(to)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

pub async fn top_products<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
    store_id: Option<i64>,
    limit: i64,
) -> RepoResult<Vec<TopProduct>> {
    let rows = sqlx::query_as::<_, TopProduct>(
        "SELECT p.id, p.name, p.image, p.price, p.sales, p.stock, p.price * p.sales AS revenue, s.id AS store_id, s.name AS store_name FROM products p JOIN stores s ON s.id = p.store_id WHERE s.workspace_id = ?1 AND (?2 IS NULL OR p.store_id = ?2) ORDER BY p.sales DESC, p.id LIMIT ?3",
    )
    .bind(workspace_id)
    .bind(store_id)
    .bind(limit)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

pub async fn top_customers<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
    store_id: Option<i64>,
    limit: i64,
) -> RepoResult<Vec<TopCustomer>> {
    let rows = sqlx::query_as::<_, TopCustomer>(
        "SELECT c.id, c.name, c.email, c.total_orders, c.total_spent, s.id AS store_id, s.name AS store_name FROM customers c JOIN stores s ON s.id = c.store_id WHERE s.workspace_id = ?1 AND (?2 IS NULL OR c.store_id = ?2) ORDER BY c.total_spent DESC, c.id LIMIT ?3",
    )
    .bind(workspace_id)
    .bind(store_id)
    .bind(limit)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// `(status, count)` for every status that has at least one order
pub async fn status_counts<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
    store_id: Option<i64>,
) -> RepoResult<Vec<(OrderStatus, i64)>> {
    let rows = sqlx::query_as::<_, (OrderStatus, i64)>(
        "SELECT status, COUNT(*) FROM orders WHERE workspace_id = ?1 AND (?2 IS NULL OR store_id = ?2) GROUP BY status ORDER BY COUNT(*) DESC, status",
    )
    .bind(workspace_id)
    .bind(store_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

pub async fn store_totals<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
) -> RepoResult<Vec<StoreTotals>> {
    let rows = sqlx::query_as::<_, StoreTotals>(
        "SELECT s.id, s.name, s.total_orders, s.total_revenue, (SELECT COUNT(*) FROM products p WHERE p.store_id = s.id) AS product_count FROM stores s WHERE s.workspace_id = ? ORDER BY s.total_revenue DESC, s.id",
    )
    .bind(workspace_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

pub async fn recent_orders<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
    store_id: Option<i64>,
    limit: i64,
) -> RepoResult<Vec<RecentOrder>> {
    let rows = sqlx::query_as::<_, RecentOrder>(
        "SELECT o.id, o.order_number, o.customer_name, o.total, o.currency, o.status, o.payment_status, o.fulfillment_status, o.store_id, s.name AS store_name, o.created_at FROM orders o JOIN stores s ON s.id = o.store_id WHERE o.workspace_id = ?1 AND (?2 IS NULL OR o.store_id = ?2) ORDER BY o.created_at DESC, o.id DESC LIMIT ?3",
    )
    .bind(workspace_id)
    .bind(store_id)
    .bind(limit)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}
