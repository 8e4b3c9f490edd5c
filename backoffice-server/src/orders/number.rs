//! Order Number Generator
//!
//! `ORD-YYMMDD-NNNN`: UTC date of creation plus a zero-padded per-day
//! sequence shared by all workspaces. The sequence comes from an upsert on
//! `order_sequences` executed in the caller's transaction, so concurrent
//! creations never observe the same value and a rolled-back creation
//! releases its number.

use crate::db::repository::{RepoResult, order_sequence};
use sqlx::SqliteExecutor;

/// `YYMMDD` of a UTC millisecond timestamp
pub fn day_key(now: i64) -> String {
    shared::util::millis_to_utc(now).format("%y%m%d").to_string()
}

/// Format a sequence value; values above 9999 widen instead of wrapping
pub fn format_order_number(day: &str, sequence: i64) -> String {
    format!("ORD-{day}-{sequence:04}")
}

/// Reserve the next order number for the day containing `now`
pub async fn next_order_number<'e>(ex: impl SqliteExecutor<'e>, now: i64) -> RepoResult<String> {
    let day = day_key(now);
    let sequence = order_sequence::next_value(ex, &day).await?;
    Ok(format_order_number(&day, sequence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    // 2024-03-05T23:59:59Z
    const LATE_MARCH_5: i64 = 1_709_683_199_000;

    #[test]
    fn test_format() {
        assert_eq!(day_key(LATE_MARCH_5), "240305");
        assert_eq!(day_key(LATE_MARCH_5 + 1_000), "240306");
        assert_eq!(format_order_number("240305", 7), "ORD-240305-0007");
        assert_eq!(format_order_number("240305", 12345), "ORD-240305-12345");
    }

    #[tokio::test]
    async fn test_sequence_restarts_each_day() {
        let pool = test_pool().await;
        assert_eq!(
            next_order_number(&pool, LATE_MARCH_5).await.unwrap(),
            "ORD-240305-0001"
        );
        assert_eq!(
            next_order_number(&pool, LATE_MARCH_5).await.unwrap(),
            "ORD-240305-0002"
        );
        assert_eq!(
            next_order_number(&pool, LATE_MARCH_5 + 1_000).await.unwrap(),
            "ORD-240306-0001"
        );
    }
}
