//! Analytics Aggregator
//!
//! Read-only reports over a workspace, optionally narrowed to one store.
//! Empty datasets yield zeros, never errors.

use serde::Deserialize;
use shared::models::{
    DashboardStats, RecentOrder, RevenuePeriod, RevenuePoint, StatusBreakdown, StoreSales,
    TopCustomer, TopProduct,
};
use sqlx::SqlitePool;

use super::buckets::{bucket_revenue, resolve_range};
use super::error::{AnalyticsError, AnalyticsResult};
use crate::db::repository::{analytics as analytics_repo, store as store_repo};

const DAY_MS: i64 = 86_400_000;
/// Width of each dashboard comparison window
const DELTA_WINDOW_MS: i64 = 30 * DAY_MS;

pub const DEFAULT_TOP_LIMIT: i64 = 10;
pub const DEFAULT_RECENT_LIMIT: i64 = 5;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueQuery {
    pub store_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub period: RevenuePeriod,
}

/// Store filter plus an optional row limit
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub store_id: Option<i64>,
    pub limit: Option<i64>,
}

fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_LIMIT)
}

/// `(current - previous) / previous * 100` to one decimal, 0 when there is
/// no previous value to compare against
pub fn percent_change(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    let change = (current - previous) as f64 / previous as f64 * 100.0;
    (change * 10.0).round() / 10.0
}

/// Rounded integer percentage of `part` in `whole`, 0 for a non-positive whole
pub fn share(part: i64, whole: i64) -> i64 {
    if whole <= 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as i64
}

#[derive(Clone)]
pub struct Analytics {
    pool: SqlitePool,
}

impl Analytics {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn ensure_store(&self, workspace_id: i64, store_id: Option<i64>) -> AnalyticsResult<()> {
        if let Some(store_id) = store_id {
            store_repo::find_in_workspace(&self.pool, store_id, workspace_id)
                .await?
                .ok_or(AnalyticsError::StoreNotFound(store_id))?;
        }
        Ok(())
    }

    /// Totals plus order and paid-revenue deltas of the last 30 days against
    /// the 30 days before
    pub async fn dashboard_stats(
        &self,
        workspace_id: i64,
        store_id: Option<i64>,
        now: i64,
    ) -> AnalyticsResult<DashboardStats> {
        self.ensure_store(workspace_id, store_id).await?;

        let total_stores = analytics_repo::count_stores(&self.pool, workspace_id, store_id).await?;
        let total_products =
            analytics_repo::count_products(&self.pool, workspace_id, store_id).await?;
        let (total_orders, total_revenue) =
            analytics_repo::order_totals(&self.pool, workspace_id, store_id, None, None).await?;

        let current_start = now - DELTA_WINDOW_MS;
        let (current_orders, current_revenue) = analytics_repo::order_totals(
            &self.pool,
            workspace_id,
            store_id,
            Some(current_start),
            Some(now + 1),
        )
        .await?;
        let (previous_orders, previous_revenue) = analytics_repo::order_totals(
            &self.pool,
            workspace_id,
            store_id,
            Some(current_start - DELTA_WINDOW_MS),
            Some(current_start),
        )
        .await?;

        Ok(DashboardStats {
            total_stores,
            total_products,
            total_orders,
            total_revenue,
            orders_change: percent_change(current_orders, previous_orders),
            revenue_change: percent_change(current_revenue, previous_revenue),
        })
    }

    pub async fn revenue_over_time(
        &self,
        workspace_id: i64,
        query: &RevenueQuery,
        now: i64,
    ) -> AnalyticsResult<Vec<RevenuePoint>> {
        let range = resolve_range(query.start_date.as_deref(), query.end_date.as_deref(), now)?;
        self.ensure_store(workspace_id, query.store_id).await?;

        let points = analytics_repo::order_points(
            &self.pool,
            workspace_id,
            query.store_id,
            range.from,
            range.to,
        )
        .await?;
        tracing::debug!(
            workspace_id,
            from = range.from,
            to = range.to,
            orders = points.len(),
            "Bucketing revenue"
        );
        Ok(bucket_revenue(&points, query.period))
    }

    /// Ranked by the lifetime `sales` counter; revenue uses the current price
    pub async fn top_products(
        &self,
        workspace_id: i64,
        query: &ReportQuery,
    ) -> AnalyticsResult<Vec<TopProduct>> {
        self.ensure_store(workspace_id, query.store_id).await?;
        let limit = clamp_limit(query.limit, DEFAULT_TOP_LIMIT);
        Ok(analytics_repo::top_products(&self.pool, workspace_id, query.store_id, limit).await?)
    }

    pub async fn top_customers(
        &self,
        workspace_id: i64,
        query: &ReportQuery,
    ) -> AnalyticsResult<Vec<TopCustomer>> {
        self.ensure_store(workspace_id, query.store_id).await?;
        let limit = clamp_limit(query.limit, DEFAULT_TOP_LIMIT);
        Ok(analytics_repo::top_customers(&self.pool, workspace_id, query.store_id, limit).await?)
    }

    pub async fn orders_by_status(
        &self,
        workspace_id: i64,
        store_id: Option<i64>,
    ) -> AnalyticsResult<Vec<StatusBreakdown>> {
        self.ensure_store(workspace_id, store_id).await?;
        let counts = analytics_repo::status_counts(&self.pool, workspace_id, store_id).await?;
        let total: i64 = counts.iter().map(|(_, count)| count).sum();
        Ok(counts
            .into_iter()
            .map(|(status, count)| StatusBreakdown {
                status,
                count,
                percentage: share(count, total),
            })
            .collect())
    }

    /// Every store in the workspace with its share of workspace revenue
    pub async fn sales_by_store(&self, workspace_id: i64) -> AnalyticsResult<Vec<StoreSales>> {
        let stores = analytics_repo::store_totals(&self.pool, workspace_id).await?;
        let total: i64 = stores.iter().map(|s| s.total_revenue).sum();
        Ok(stores
            .into_iter()
            .map(|s| StoreSales {
                store_id: s.id,
                name: s.name,
                orders: s.total_orders,
                revenue: s.total_revenue,
                products: s.product_count,
                percentage: share(s.total_revenue, total),
            })
            .collect())
    }

    pub async fn recent_orders(
        &self,
        workspace_id: i64,
        query: &ReportQuery,
    ) -> AnalyticsResult<Vec<RecentOrder>> {
        self.ensure_store(workspace_id, query.store_id).await?;
        let limit = clamp_limit(query.limit, DEFAULT_RECENT_LIMIT);
        Ok(analytics_repo::recent_orders(&self.pool, workspace_id, query.store_id, limit).await?)
    }
}
