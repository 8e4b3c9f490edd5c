//! Product Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Catalog product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
    pub sku: Option<String>,
    pub image: Option<String>,
    /// Current catalog price in minor units
    pub price: i64,
    pub stock: i64,
    /// When true, order creation never drives `stock` below zero
    pub track_inventory: bool,
    /// Units ever sold (maintained outside order creation)
    pub sales: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    #[validate(length(min = 1, max = 200, code = "product_name"))]
    pub name: String,
    pub sku: Option<String>,
    pub image: Option<String>,
    #[validate(range(min = 0, code = "product_price"))]
    pub price: i64,
    #[serde(default)]
    #[validate(range(min = 0, code = "product_stock"))]
    pub stock: i64,
    #[serde(default = "default_track_inventory")]
    pub track_inventory: bool,
}

fn default_track_inventory() -> bool {
    true
}
