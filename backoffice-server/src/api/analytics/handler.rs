//! Analytics API Handlers

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use shared::models::{
    DashboardStats, RecentOrder, RevenuePoint, StatusBreakdown, StoreSales, TopCustomer,
    TopProduct,
};
use shared::util::now_millis;

use crate::analytics::{ReportQuery, RevenueQuery};
use crate::api::{ApiResult, StoreQuery};
use crate::auth::WorkspaceIdentity;
use crate::state::AppState;

/// GET /api/analytics/dashboard?storeId=
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
    Query(query): Query<StoreQuery>,
) -> ApiResult<DashboardStats> {
    let stats = state
        .analytics
        .dashboard_stats(identity.workspace_id, query.store_id, now_millis())
        .await?;
    Ok(Json(stats))
}

/// GET /api/analytics/revenue?storeId=&startDate=YYYY-MM-DD&endDate=YYYY-MM-DD&period=day|week|month
pub async fn revenue(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
    Query(query): Query<RevenueQuery>,
) -> ApiResult<Vec<RevenuePoint>> {
    let series = state
        .analytics
        .revenue_over_time(identity.workspace_id, &query, now_millis())
        .await?;
    Ok(Json(series))
}

/// GET /api/analytics/top-products?storeId=&limit=
pub async fn top_products(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Vec<TopProduct>> {
    Ok(Json(
        state
            .analytics
            .top_products(identity.workspace_id, &query)
            .await?,
    ))
}

/// GET /api/analytics/top-customers?storeId=&limit=
pub async fn top_customers(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Vec<TopCustomer>> {
    Ok(Json(
        state
            .analytics
            .top_customers(identity.workspace_id, &query)
            .await?,
    ))
}

/// GET /api/analytics/orders-by-status?storeId=
pub async fn orders_by_status(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
    Query(query): Query<StoreQuery>,
) -> ApiResult<Vec<StatusBreakdown>> {
    Ok(Json(
        state
            .analytics
            .orders_by_status(identity.workspace_id, query.store_id)
            .await?,
    ))
}

/// GET /api/analytics/sales-by-store
pub async fn sales_by_store(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
) -> ApiResult<Vec<StoreSales>> {
    Ok(Json(
        state.analytics.sales_by_store(identity.workspace_id).await?,
    ))
}

/// GET /api/analytics/recent-orders?storeId=&limit=
pub async fn recent_orders(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Vec<RecentOrder>> {
    Ok(Json(
        state
            .analytics
            .recent_orders(identity.workspace_id, &query)
            .await?,
    ))
}
