//! Store API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::AppError;
use shared::models::{Product, ProductCreate, Store, StoreCreate};
use shared::util::now_millis;

use crate::api::ApiResult;
use crate::auth::WorkspaceIdentity;
use crate::catalog;
use crate::state::AppState;

/// GET /api/stores
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
) -> ApiResult<Vec<Store>> {
    let stores = catalog::list_stores(&state.pool, identity.workspace_id).await?;
    Ok(Json(stores))
}

/// POST /api/stores
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
    Json(payload): Json<StoreCreate>,
) -> Result<(StatusCode, Json<Store>), AppError> {
    let store =
        catalog::create_store(&state.pool, identity.workspace_id, payload, now_millis()).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

/// POST /api/stores/{id}/products
pub async fn create_product(
    State(state): State<AppState>,
    Extension(identity): Extension<WorkspaceIdentity>,
    Path(store_id): Path<i64>,
    Json(payload): Json<ProductCreate>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = catalog::create_product(
        &state.pool,
        identity.workspace_id,
        store_id,
        payload,
        now_millis(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(product)))
}
