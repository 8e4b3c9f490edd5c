//! Store Repository

use super::{RepoError, RepoResult};
use shared::models::{Store, StoreCreate, StoreSummary};
use sqlx::SqliteExecutor;

const STORE_COLUMNS: &str =
    "id, workspace_id, name, currency, total_orders, total_revenue, created_at, updated_at";

/// Resolve a store under a workspace. `None` covers both "missing" and
/// "owned by another workspace".
pub async fn find_in_workspace<'e>(
    ex: impl SqliteExecutor<'e>,
    store_id: i64,
    workspace_id: i64,
) -> RepoResult<Option<Store>> {
    let row = sqlx::query_as::<_, Store>(&format!(
        "SELECT {STORE_COLUMNS} FROM stores WHERE id = ? AND workspace_id = ?"
    ))
    .bind(store_id)
    .bind(workspace_id)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}

pub async fn find_summary<'e>(
    ex: impl SqliteExecutor<'e>,
    store_id: i64,
) -> RepoResult<Option<StoreSummary>> {
    let row = sqlx::query_as::<_, StoreSummary>(
        "SELECT id, name, currency FROM stores WHERE id = ?",
    )
    .bind(store_id)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}

/// Summaries for a batch of stores, used to decorate order lists
pub async fn find_summaries_in_workspace<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
) -> RepoResult<Vec<StoreSummary>> {
    let rows = sqlx::query_as::<_, StoreSummary>(
        "SELECT id, name, currency FROM stores WHERE workspace_id = ?",
    )
    .bind(workspace_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

pub async fn find_all_in_workspace<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
) -> RepoResult<Vec<Store>> {
    let rows = sqlx::query_as::<_, Store>(&format!(
        "SELECT {STORE_COLUMNS} FROM stores WHERE workspace_id = ? ORDER BY created_at, id"
    ))
    .bind(workspace_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

pub async fn count_in_workspace<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stores WHERE workspace_id = ?")
        .bind(workspace_id)
        .fetch_one(ex)
        .await?;
    Ok(count)
}

pub async fn create<'e>(
    ex: impl SqliteExecutor<'e>,
    workspace_id: i64,
    data: &StoreCreate,
    now: i64,
) -> RepoResult<Store> {
    let store = Store {
        id: shared::util::snowflake_id(),
        workspace_id,
        name: data.name.trim().to_string(),
        currency: data.currency.to_ascii_uppercase(),
        total_orders: 0,
        total_revenue: 0,
        created_at: now,
        updated_at: now,
    };
    sqlx::query(
        "INSERT INTO stores (id, workspace_id, name, currency, total_orders, total_revenue, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 0, 0, ?5, ?5)",
    )
    .bind(store.id)
    .bind(store.workspace_id)
    .bind(&store.name)
    .bind(&store.currency)
    .bind(now)
    .execute(ex)
    .await?;
    Ok(store)
}

/// Atomic counter bump after a successful order insert
pub async fn increment_counters<'e>(
    ex: impl SqliteExecutor<'e>,
    store_id: i64,
    revenue: i64,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE stores SET total_orders = total_orders + 1, total_revenue = total_revenue + ?1, updated_at = ?2 WHERE id = ?3",
    )
    .bind(revenue)
    .bind(now)
    .bind(store_id)
    .execute(ex)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Store {store_id} not found")));
    }
    Ok(())
}
