//! Per-day order number sequence

use super::RepoResult;
use sqlx::SqliteExecutor;

/// Atomically increment the counter for `day` and return the new value.
///
/// The first call for a day returns 1. Values are never reused, even after
/// the orders that consumed them are deleted.
pub async fn next_value<'e>(ex: impl SqliteExecutor<'e>, day: &str) -> RepoResult<i64> {
    let value = sqlx::query_scalar::<_, i64>(
        "INSERT INTO order_sequences (day, last_value) VALUES (?1, 1) ON CONFLICT(day) DO UPDATE SET last_value = last_value + 1 RETURNING last_value",
    )
    .bind(day)
    .fetch_one(ex)
    .await?;
    Ok(value)
}
