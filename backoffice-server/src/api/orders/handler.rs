//! Order API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppError};
use shared::models::{Order, OrderCreate, OrderStats, OrderUpdate};
use shared::util::now_millis;

use crate::api::{ApiResult, StoreQuery};
use crate::auth::WorkspaceIdentity;
use crate::orders::OrderListQuery;
use crate::state::AppState;

/// GET /api/orders?storeId=&status=&page=&perPage=
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
    Query(query): Query<OrderListQuery>,
) -> ApiResult<Vec<Order>> {
    let orders = state.orders.list(identity.workspace_id, &query).await?;
    Ok(Json(orders))
}

/// POST /api/orders
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
    Json(payload): Json<OrderCreate>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = state
        .orders
        .create(identity.workspace_id, payload, now_millis())
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders/stats?storeId=
pub async fn stats(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
    Query(query): Query<StoreQuery>,
) -> ApiResult<OrderStats> {
    let stats = state
        .orders
        .stats(identity.workspace_id, query.store_id)
        .await?;
    Ok(Json(stats))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Order> {
    Ok(Json(state.orders.get(identity.workspace_id, id).await?))
}

/// PATCH /api/orders/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderUpdate>,
) -> ApiResult<Order> {
    let order = state
        .orders
        .update(identity.workspace_id, id, payload, now_millis())
        .await?;
    Ok(Json(order))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    state.orders.delete(identity.workspace_id, id).await?;
    Ok(Json(ApiResponse {
        message: "Order deleted".to_string(),
        ..ApiResponse::ok()
    }))
}
