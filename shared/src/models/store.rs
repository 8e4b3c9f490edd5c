//! Store Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sellable storefront within a workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: i64,
    pub workspace_id: i64,
    pub name: String,
    /// ISO 4217 code, copied onto every order
    pub currency: String,
    /// Running counter, incremented inside the order-creation transaction
    pub total_orders: i64,
    /// Running counter in minor units
    pub total_revenue: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Store projection embedded in order responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub id: i64,
    pub name: String,
    pub currency: String,
}

/// Create store payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StoreCreate {
    #[validate(length(min = 1, max = 120, code = "store_name"))]
    pub name: String,
    #[validate(length(equal = 3, code = "store_currency"))]
    pub currency: String,
}
