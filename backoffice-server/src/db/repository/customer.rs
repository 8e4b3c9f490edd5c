//! Customer Repository
//!
//! Customer aggregates (`total_orders`, `total_spent`) are maintained outside
//! order creation; this module only records them.

use super::RepoResult;
use shared::models::Customer;
use sqlx::SqliteExecutor;

pub async fn create<'e>(
    ex: impl SqliteExecutor<'e>,
    store_id: i64,
    name: &str,
    email: &str,
    total_orders: i64,
    total_spent: i64,
) -> RepoResult<Customer> {
    let customer = Customer {
        id: shared::util::snowflake_id(),
        store_id,
        name: name.to_string(),
        email: email.to_string(),
        total_orders,
        total_spent,
        created_at: shared::util::now_millis(),
    };
    sqlx::query(
        "INSERT INTO customers (id, store_id, name, email, total_orders, total_spent, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(customer.id)
    .bind(customer.store_id)
    .bind(&customer.name)
    .bind(&customer.email)
    .bind(customer.total_orders)
    .bind(customer.total_spent)
    .bind(customer.created_at)
    .execute(ex)
    .await?;
    Ok(customer)
}
