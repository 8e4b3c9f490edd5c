//! Date ranges and revenue bucketing
//!
//! Everything here is pure: callers pass `now` and the loaded order points.
//! Dates are UTC calendar dates.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use shared::models::{PaymentStatus, RevenuePeriod, RevenuePoint};
use shared::util::millis_to_utc;

use super::error::{AnalyticsError, AnalyticsResult};
use crate::db::repository::analytics::OrderPoint;

/// Trailing window used when no range is given, today included
pub const DEFAULT_RANGE_DAYS: u64 = 30;

/// Half-open `[from, to)` range in UTC millis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: i64,
    pub to: i64,
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (its UTC date is used)
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(input)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

fn start_of_day(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

fn parse_bound(label: &str, value: Option<&str>) -> AnalyticsResult<Option<NaiveDate>> {
    value
        .map(|raw| {
            parse_date(raw)
                .ok_or_else(|| AnalyticsError::InvalidRange(format!("Unparseable {label}: {raw}")))
        })
        .transpose()
}

/// Resolve the caller's dates into a millisecond range.
///
/// Missing bounds default to the trailing [`DEFAULT_RANGE_DAYS`] ending
/// today. The end date is inclusive through the end of its UTC day.
pub fn resolve_range(
    start_date: Option<&str>,
    end_date: Option<&str>,
    now: i64,
) -> AnalyticsResult<DateRange> {
    let start = parse_bound("startDate", start_date)?;
    let end = parse_bound("endDate", end_date)?;

    let end = end.unwrap_or_else(|| millis_to_utc(now).date_naive());
    let start = match start {
        Some(start) => start,
        None => end
            .checked_sub_days(Days::new(DEFAULT_RANGE_DAYS - 1))
            .unwrap_or(end),
    };

    if start > end {
        return Err(AnalyticsError::InvalidRange(format!(
            "startDate {start} is after endDate {end}"
        )));
    }

    let next_day = end.checked_add_days(Days::new(1)).unwrap_or(end);
    Ok(DateRange {
        from: start_of_day(start),
        to: start_of_day(next_day),
    })
}

/// Bucket key for an order created at `created_at`
pub fn bucket_key(created_at: i64, period: RevenuePeriod) -> String {
    let date = millis_to_utc(created_at).date_naive();
    match period {
        RevenuePeriod::Day => date.format("%Y-%m-%d").to_string(),
        RevenuePeriod::Week => {
            let back = u64::from(date.weekday().num_days_from_sunday());
            date.checked_sub_days(Days::new(back))
                .unwrap_or(date)
                .format("%Y-%m-%d")
                .to_string()
        }
        RevenuePeriod::Month => date.format("%Y-%m").to_string(),
    }
}

/// Sparse revenue series sorted by key.
///
/// Every order counts towards `orders`; only PAID orders add to `revenue`.
pub fn bucket_revenue(points: &[OrderPoint], period: RevenuePeriod) -> Vec<RevenuePoint> {
    let mut buckets: BTreeMap<String, (i64, i64)> = BTreeMap::new();
    for point in points {
        let entry = buckets.entry(bucket_key(point.created_at, period)).or_default();
        if point.payment_status == PaymentStatus::Paid {
            entry.0 += point.total;
        }
        entry.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(date, (revenue, orders))| RevenuePoint {
            date,
            revenue,
            orders,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-01T00:00:00Z, a Monday
    const JAN_1: i64 = 1_704_067_200_000;
    const DAY: i64 = 86_400_000;

    fn point(created_at: i64, total: i64, payment_status: PaymentStatus) -> OrderPoint {
        OrderPoint {
            created_at,
            total,
            payment_status,
        }
    }

    #[test]
    fn test_daily_buckets() {
        let points = vec![
            point(JAN_1 + 3_600_000, 1_000, PaymentStatus::Paid),
            point(JAN_1 + 7_200_000, 500, PaymentStatus::Pending),
            point(JAN_1 + DAY + 60_000, 2_000, PaymentStatus::Paid),
        ];
        assert_eq!(
            bucket_revenue(&points, RevenuePeriod::Day),
            vec![
                RevenuePoint {
                    date: "2024-01-01".into(),
                    revenue: 1_000,
                    orders: 2
                },
                RevenuePoint {
                    date: "2024-01-02".into(),
                    revenue: 2_000,
                    orders: 1
                },
            ]
        );
    }

    #[test]
    fn test_sparse_and_sorted() {
        let points = vec![
            point(JAN_1 + 9 * DAY, 300, PaymentStatus::Paid),
            point(JAN_1, 100, PaymentStatus::Refunded),
        ];
        let series = bucket_revenue(&points, RevenuePeriod::Day);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, "2024-01-01");
        assert_eq!(series[0].revenue, 0);
        assert_eq!(series[0].orders, 1);
        assert_eq!(series[1].date, "2024-01-10");
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // Monday 2024-01-01 belongs to the week of Sunday 2023-12-31
        assert_eq!(bucket_key(JAN_1, RevenuePeriod::Week), "2023-12-31");
        // Saturday 2024-01-06 too
        assert_eq!(bucket_key(JAN_1 + 5 * DAY, RevenuePeriod::Week), "2023-12-31");
        // Sunday 2024-01-07 opens a new week
        assert_eq!(bucket_key(JAN_1 + 6 * DAY, RevenuePeriod::Week), "2024-01-07");
    }

    #[test]
    fn test_month_buckets() {
        let points = vec![
            point(JAN_1, 100, PaymentStatus::Paid),
            point(JAN_1 + 31 * DAY, 200, PaymentStatus::Paid),
            point(JAN_1 + 40 * DAY, 50, PaymentStatus::Failed),
        ];
        let series = bucket_revenue(&points, RevenuePeriod::Month);
        assert_eq!(
            series
                .iter()
                .map(|p| (p.date.as_str(), p.revenue, p.orders))
                .collect::<Vec<_>>(),
            vec![("2024-01", 100, 1), ("2024-02", 200, 2)]
        );
    }

    #[test]
    fn test_default_range_is_trailing_thirty_days() {
        let now = JAN_1 + 45 * DAY + 5_000;
        let range = resolve_range(None, None, now).unwrap();
        assert_eq!(range.to, JAN_1 + 46 * DAY);
        assert_eq!(range.from, JAN_1 + 16 * DAY);
    }

    #[test]
    fn test_explicit_range_end_is_inclusive() {
        let range = resolve_range(Some("2024-01-01"), Some("2024-01-02"), 0).unwrap();
        assert_eq!(range, DateRange {
            from: JAN_1,
            to: JAN_1 + 2 * DAY
        });

        let range = resolve_range(Some("2024-01-01T18:00:00+00:00"), Some("2024-01-01"), 0).unwrap();
        assert_eq!(range.from, JAN_1);
        assert_eq!(range.to, JAN_1 + DAY);
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(matches!(
            resolve_range(Some("2024-02-01"), Some("2024-01-01"), 0),
            Err(AnalyticsError::InvalidRange(_))
        ));
        assert!(matches!(
            resolve_range(Some("yesterday"), None, 0),
            Err(AnalyticsError::InvalidRange(_))
        ));
        assert!(matches!(
            resolve_range(None, Some("2024-13-01"), 0),
            Err(AnalyticsError::InvalidRange(_))
        ));
    }
}
