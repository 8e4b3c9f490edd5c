//! Customer Model

use serde::{Deserialize, Serialize};

/// Store customer with lifetime aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
    pub email: String,
    pub total_orders: i64,
    /// Lifetime spend in minor units
    pub total_spent: i64,
    pub created_at: i64,
}
