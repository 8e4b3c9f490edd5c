//! Quota Guard
//!
//! Stateless predicates over a workspace's [`Plan`]. Callers supply the
//! current resource count; a count that has already reached the ceiling
//! denies the next mutation.
//!
//! The order ceiling is a soft limit: it is checked inside the creation
//! transaction but not reserved, so two racing requests may both pass at
//! `limit - 1`.

use chrono::{Datelike, TimeZone, Utc};
use shared::error::{AppError, ErrorCode};
use shared::models::Plan;
use std::fmt;
use thiserror::Error;

/// Resource governed by a plan ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaResource {
    MonthlyOrders,
    StoreProducts,
    Stores,
}

impl QuotaResource {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MonthlyOrders => ErrorCode::OrderQuotaExceeded,
            Self::StoreProducts => ErrorCode::ProductQuotaExceeded,
            Self::Stores => ErrorCode::StoreQuotaExceeded,
        }
    }
}

impl fmt::Display for QuotaResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MonthlyOrders => "monthly orders",
            Self::StoreProducts => "products per store",
            Self::Stores => "stores",
        };
        f.write_str(name)
    }
}

/// Denial carrying the numeric ceiling for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Quota exceeded for {resource} (limit {limit})")]
pub struct QuotaExceeded {
    pub resource: QuotaResource,
    pub limit: i64,
}

impl From<QuotaExceeded> for AppError {
    fn from(err: QuotaExceeded) -> Self {
        AppError::quota_exceeded(err.resource.error_code(), err.limit)
    }
}

fn check(resource: QuotaResource, limit: i64, current: i64) -> Result<(), QuotaExceeded> {
    if current >= limit {
        return Err(QuotaExceeded { resource, limit });
    }
    Ok(())
}

/// `orders_this_month`: orders created workspace-wide since [`month_start`]
pub fn check_order_quota(plan: &Plan, orders_this_month: i64) -> Result<(), QuotaExceeded> {
    check(
        QuotaResource::MonthlyOrders,
        plan.max_orders_per_month,
        orders_this_month,
    )
}

pub fn check_product_quota(plan: &Plan, products_in_store: i64) -> Result<(), QuotaExceeded> {
    check(
        QuotaResource::StoreProducts,
        plan.max_products_per_store,
        products_in_store,
    )
}

pub fn check_store_quota(plan: &Plan, stores_in_workspace: i64) -> Result<(), QuotaExceeded> {
    check(QuotaResource::Stores, plan.max_stores, stores_in_workspace)
}

/// First instant (UTC millis) of the calendar month containing `now`
pub fn month_start(now: i64) -> i64 {
    let dt = shared::util::millis_to_utc(now);
    Utc.with_ymd_and_hms(dt.year(), dt.month(), 1, 0, 0, 0)
        .single()
        .map(|d| d.timestamp_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(orders: i64, products: i64, stores: i64) -> Plan {
        Plan {
            id: 1,
            name: "Test".into(),
            max_orders_per_month: orders,
            max_products_per_store: products,
            max_stores: stores,
        }
    }

    #[test]
    fn test_nth_allowed_next_denied() {
        let p = plan(3, 2, 1);
        assert!(check_order_quota(&p, 0).is_ok());
        assert!(check_order_quota(&p, 2).is_ok());
        assert_eq!(
            check_order_quota(&p, 3),
            Err(QuotaExceeded {
                resource: QuotaResource::MonthlyOrders,
                limit: 3
            })
        );
        assert!(check_product_quota(&p, 1).is_ok());
        assert!(check_product_quota(&p, 2).is_err());
        assert!(check_store_quota(&p, 0).is_ok());
        assert!(check_store_quota(&p, 1).is_err());
    }

    #[test]
    fn test_zero_ceiling_denies_everything() {
        let p = plan(0, 0, 0);
        assert!(check_order_quota(&p, 0).is_err());
        assert!(check_store_quota(&p, 0).is_err());
    }

    #[test]
    fn test_denial_maps_to_distinct_codes() {
        let err: AppError = check_store_quota(&plan(1, 1, 1), 1).unwrap_err().into();
        assert_eq!(err.code, ErrorCode::StoreQuotaExceeded);
        assert_eq!(err.details.unwrap().get("limit").unwrap(), 1);

        let err: AppError = check_order_quota(&plan(5, 1, 1), 9).unwrap_err().into();
        assert_eq!(err.code, ErrorCode::OrderQuotaExceeded);
        assert_eq!(err.message, "Monthly order limit reached (5)");
    }

    #[test]
    fn test_month_start() {
        // 2024-02-15T13:45:00Z
        let mid_feb = 1_708_004_700_000;
        // 2024-02-01T00:00:00Z
        assert_eq!(month_start(mid_feb), 1_706_745_600_000);
        assert_eq!(month_start(1_706_745_600_000), 1_706_745_600_000);
    }
}
