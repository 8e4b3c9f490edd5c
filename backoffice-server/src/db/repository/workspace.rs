//! Workspace & Plan Repository

use super::RepoResult;
use shared::models::{Plan, Workspace};
use sqlx::SqliteExecutor;

pub async fn find_by_id<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
) -> RepoResult<Option<Workspace>> {
    let row = sqlx::query_as::<_, Workspace>(
        "SELECT id, name, plan_id, created_at FROM workspaces WHERE id = ?",
    )
    .bind(workspace_id)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}

/// Active plan of a workspace
pub async fn find_plan<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
) -> RepoResult<Option<Plan>> {
    let row = sqlx::query_as::<_, Plan>(
        "SELECT p.id, p.name, p.max_orders_per_month, p.max_products_per_store, p.max_stores FROM plans p JOIN workspaces w ON w.plan_id = p.id WHERE w.id = ?",
    )
    .bind(workspace_id)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}

pub async fn create_plan<'e>(ex: impl SqliteExecutor<'e>, plan: &Plan) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO plans (id, name, max_orders_per_month, max_products_per_store, max_stores) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(plan.id)
    .bind(&plan.name)
    .bind(plan.max_orders_per_month)
    .bind(plan.max_products_per_store)
    .bind(plan.max_stores)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn create<'e>(
    ex: impl SqliteExecutor<'e>,
    name: &str,
    plan_id: i64,
) -> RepoResult<Workspace> {
    let workspace = Workspace {
        id: shared::util::snowflake_id(),
        name: name.to_string(),
        plan_id,
        created_at: shared::util::now_millis(),
    };
    sqlx::query("INSERT INTO workspaces (id, name, plan_id, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(workspace.id)
        .bind(&workspace.name)
        .bind(workspace.plan_id)
        .bind(workspace.created_at)
        .execute(ex)
        .await?;
    Ok(workspace)
}
