//! Store and product provisioning
//!
//! Both creations check the plan ceiling and insert in one transaction.

use shared::error::{AppError, ErrorCode};
use shared::models::{Plan, Product, ProductCreate, Store, StoreCreate};
use sqlx::{SqliteConnection, SqlitePool};

use crate::db::repository::{product as product_repo, store as store_repo, workspace as workspace_repo};
use crate::error::ServiceResult;
use crate::{db, quota, validation};

async fn load_plan(conn: &mut SqliteConnection, workspace_id: i64) -> ServiceResult<Plan> {
    if let Some(plan) = workspace_repo::find_plan(&mut *conn, workspace_id).await? {
        return Ok(plan);
    }
    let code = match workspace_repo::find_by_id(&mut *conn, workspace_id).await? {
        Some(_) => ErrorCode::PlanNotFound,
        None => ErrorCode::WorkspaceNotFound,
    };
    Err(AppError::new(code).into())
}

pub async fn create_store(
    pool: &SqlitePool,
    workspace_id: i64,
    input: StoreCreate,
    now: i64,
) -> ServiceResult<Store> {
    validation::check(&input)?;

    let mut tx = db::begin_write(pool).await?;
    let plan = load_plan(&mut tx, workspace_id).await?;
    let existing = store_repo::count_in_workspace(&mut *tx, workspace_id).await?;
    quota::check_store_quota(&plan, existing).map_err(AppError::from)?;

    let store = store_repo::create(&mut *tx, workspace_id, &input, now).await?;
    tx.commit().await?;

    tracing::info!(store_id = store.id, workspace_id, "Store created");
    Ok(store)
}

pub async fn create_product(
    pool: &SqlitePool,
    workspace_id: i64,
    store_id: i64,
    input: ProductCreate,
    now: i64,
) -> ServiceResult<Product> {
    validation::check(&input)?;

    let mut tx = db::begin_write(pool).await?;
    store_repo::find_in_workspace(&mut *tx, store_id, workspace_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound))?;
    let plan = load_plan(&mut tx, workspace_id).await?;
    let existing = product_repo::count_in_store(&mut *tx, store_id).await?;
    quota::check_product_quota(&plan, existing).map_err(AppError::from)?;

    let product = product_repo::create(&mut *tx, store_id, &input, now).await?;
    tx.commit().await?;

    tracing::info!(product_id = product.id, store_id, workspace_id, "Product created");
    Ok(product)
}

pub async fn list_stores(pool: &SqlitePool, workspace_id: i64) -> ServiceResult<Vec<Store>> {
    Ok(store_repo::find_all_in_workspace(pool, workspace_id).await?)
}
