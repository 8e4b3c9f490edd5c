//! Workspace & Plan Models

use serde::{Deserialize, Serialize};

/// Quota bundle attached to a workspace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: i64,
    pub name: String,
    pub max_orders_per_month: i64,
    pub max_products_per_store: i64,
    pub max_stores: i64,
}

/// Top-level tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    pub plan_id: i64,
    pub created_at: i64,
}
