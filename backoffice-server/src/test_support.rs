//! Seed helpers for unit tests

use shared::models::{CustomerContact, OrderCreate, OrderItemInput, Plan, ProductCreate, StoreCreate};
use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::config::Config;
use crate::db::DbService;
use crate::db::repository::{customer, product, store, workspace};

/// File-backed WAL pool with the production pool size, for contention tests
pub async fn file_pool(dir: &TempDir) -> SqlitePool {
    let mut config = Config::for_tests("test-secret");
    config.database_url = format!("sqlite:{}", dir.path().join("backoffice.db").display());
    config.db_max_connections = 5;
    DbService::new(&config).await.unwrap().pool
}

/// Plan + workspace, returns the workspace id
pub async fn seed_workspace(
    pool: &SqlitePool,
    max_orders: i64,
    max_products: i64,
    max_stores: i64,
) -> i64 {
    let plan = Plan {
        id: shared::util::snowflake_id(),
        name: "Test".into(),
        max_orders_per_month: max_orders,
        max_products_per_store: max_products,
        max_stores,
    };
    workspace::create_plan(pool, &plan).await.unwrap();
    workspace::create(pool, "Test Workspace", plan.id)
        .await
        .unwrap()
        .id
}

pub async fn seed_store(pool: &SqlitePool, workspace_id: i64) -> i64 {
    let input = StoreCreate {
        name: "Main Street".into(),
        currency: "USD".into(),
    };
    store::create(pool, workspace_id, &input, shared::util::now_millis())
        .await
        .unwrap()
        .id
}

pub async fn seed_product(
    pool: &SqlitePool,
    store_id: i64,
    name: &str,
    price: i64,
    stock: i64,
    track_inventory: bool,
) -> i64 {
    let input = ProductCreate {
        name: name.into(),
        sku: Some(format!("SKU-{name}")),
        image: None,
        price,
        stock,
        track_inventory,
    };
    product::create(pool, store_id, &input, shared::util::now_millis())
        .await
        .unwrap()
        .id
}

pub async fn seed_customer(
    pool: &SqlitePool,
    store_id: i64,
    name: &str,
    total_orders: i64,
    total_spent: i64,
) -> i64 {
    let email = format!("{}@example.com", name.to_lowercase());
    customer::create(pool, store_id, name, &email, total_orders, total_spent)
        .await
        .unwrap()
        .id
}

/// Products with sales counters set directly
pub async fn set_sales(pool: &SqlitePool, product_id: i64, sales: i64) {
    sqlx::query("UPDATE products SET sales = ? WHERE id = ?")
        .bind(sales)
        .bind(product_id)
        .execute(pool)
        .await
        .unwrap();
}

pub fn contact(name: &str) -> CustomerContact {
    CustomerContact {
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: Some("+1 555 0100".into()),
        address: Some("1 Main St".into()),
        city: Some("Springfield".into()),
        state: Some("IL".into()),
        zip: Some("62701".into()),
        country: Some("US".into()),
    }
}

/// Order payload with `(product_id, quantity, unit_price)` lines
pub fn order_input(store_id: i64, lines: &[(i64, i64, i64)]) -> OrderCreate {
    OrderCreate {
        store_id,
        customer: contact("Ada"),
        items: lines
            .iter()
            .map(|&(product_id, quantity, price)| OrderItemInput {
                product_id,
                quantity,
                price,
            })
            .collect(),
        shipping: None,
        tax: None,
        discount: None,
        payment_method: Some("card".into()),
        notes: None,
        source: None,
    }
}
