//! Analytics read models
//!
//! All amounts are minor currency units. Percentages are integers in 0..=100
//! except the dashboard deltas, which are one-decimal floats.

use serde::{Deserialize, Serialize};

use super::order::{FulfillmentStatus, OrderStatus, PaymentStatus};

/// Workspace overview
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_stores: i64,
    pub total_products: i64,
    pub total_orders: i64,
    pub total_revenue: i64,
    /// Percent change of orders in the last 30 days over the 30 days before
    pub orders_change: f64,
    /// Same window comparison for paid revenue
    pub revenue_change: f64,
}

/// Revenue bucket width
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RevenuePeriod {
    #[default]
    Day,
    Week,
    Month,
}

/// One bucket of the revenue series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    /// `YYYY-MM-DD`, `YYYY-MM-DD` of the week start (Sunday) or `YYYY-MM`
    pub date: String,
    pub revenue: i64,
    pub orders: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub price: i64,
    pub sales: i64,
    pub stock: i64,
    /// `price × sales`
    pub revenue: i64,
    pub store_id: i64,
    pub store_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct TopCustomer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub total_orders: i64,
    pub total_spent: i64,
    pub store_id: i64,
    pub store_name: String,
}

/// Share of orders in one status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub status: OrderStatus,
    pub count: i64,
    pub percentage: i64,
}

/// Per-store share of revenue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoreSales {
    pub store_id: i64,
    pub name: String,
    pub orders: i64,
    pub revenue: i64,
    pub products: i64,
    pub percentage: i64,
}

/// Flattened order row for the activity feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    pub id: i64,
    pub order_number: String,
    pub customer_name: String,
    pub total: i64,
    pub currency: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub fulfillment_status: FulfillmentStatus,
    pub store_id: i64,
    pub store_name: String,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_period_lowercase() {
        assert_eq!(
            serde_json::from_str::<RevenuePeriod>("\"week\"").unwrap(),
            RevenuePeriod::Week
        );
        assert_eq!(serde_json::to_string(&RevenuePeriod::Month).unwrap(), "\"month\"");
        assert!(serde_json::from_str::<RevenuePeriod>("\"year\"").is_err());
    }

    #[test]
    fn test_dashboard_camel_case() {
        let json = serde_json::to_value(DashboardStats {
            orders_change: 12.5,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["ordersChange"], 12.5);
        assert_eq!(json["totalStores"], 0);
    }
}
