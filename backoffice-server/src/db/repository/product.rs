//! Product Repository

use super::RepoResult;
use shared::models::{Product, ProductCreate};
use sqlx::SqliteExecutor;

const PRODUCT_COLUMNS: &str =
    "id, store_id, name, sku, image, price, stock, track_inventory, sales, created_at, updated_at";

/// Resolve a product under a store. Cross-store references resolve to `None`.
pub async fn find_in_store<'e>(
    ex: impl SqliteExecutor<'e>,
    product_id: i64,
    store_id: i64,
) -> RepoResult<Option<Product>> {
    let row = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ? AND store_id = ?"
    ))
    .bind(product_id)
    .bind(store_id)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}

pub async fn count_in_store<'e>(ex: impl SqliteExecutor<'e>, store_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE store_id = ?")
        .bind(store_id)
        .fetch_one(ex)
        .await?;
    Ok(count)
}

pub async fn create<'e>(
    ex: impl SqliteExecutor<'e>,
    store_id: i64,
    data: &ProductCreate,
    now: i64,
) -> RepoResult<Product> {
    let product = Product {
        id: shared::util::snowflake_id(),
        store_id,
        name: data.name.trim().to_string(),
        sku: data.sku.clone(),
        image: data.image.clone(),
        price: data.price,
        stock: data.stock,
        track_inventory: data.track_inventory,
        sales: 0,
        created_at: now,
        updated_at: now,
    };
    sqlx::query(
        "INSERT INTO products (id, store_id, name, sku, image, price, stock, track_inventory, sales, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, ?9, ?9)",
    )
    .bind(product.id)
    .bind(product.store_id)
    .bind(&product.name)
    .bind(&product.sku)
    .bind(&product.image)
    .bind(product.price)
    .bind(product.stock)
    .bind(product.track_inventory)
    .bind(now)
    .execute(ex)
    .await?;
    Ok(product)
}

/// Conditional decrement: succeeds only while `stock >= quantity`.
///
/// Returns `false` when the guard rejected the update, which means another
/// order consumed the stock after it was read.
pub async fn decrement_stock<'e>(
    ex: impl SqliteExecutor<'e>,
    product_id: i64,
    store_id: i64,
    quantity: i64,
    now: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE products SET stock = stock - ?1, updated_at = ?2 WHERE id = ?3 AND store_id = ?4 AND stock >= ?1",
    )
    .bind(quantity)
    .bind(now)
    .bind(product_id)
    .bind(store_id)
    .execute(ex)
    .await?;
    Ok(rows.rows_affected() == 1)
}

/// Catalog price change. Never touches order snapshots.
pub async fn update_price<'e>(
    ex: impl SqliteExecutor<'e>,
    product_id: i64,
    price: i64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE products SET price = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(price)
        .bind(now)
        .bind(product_id)
        .execute(ex)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::test_support::{seed_product, seed_store, seed_workspace};

    #[tokio::test]
    async fn test_decrement_stock_guard() {
        let pool = test_pool().await;
        let ws = seed_workspace(&pool, 100, 10, 5).await;
        let store = seed_store(&pool, ws).await;
        let product = seed_product(&pool, store, "Mug", 1_200, 3, true).await;

        assert!(decrement_stock(&pool, product, store, 2, 10).await.unwrap());
        assert!(!decrement_stock(&pool, product, store, 2, 11).await.unwrap());
        assert!(decrement_stock(&pool, product, store, 1, 12).await.unwrap());

        let p = find_in_store(&pool, product, store).await.unwrap().unwrap();
        assert_eq!(p.stock, 0);
        assert_eq!(p.updated_at, 12);
    }

    #[tokio::test]
    async fn test_product_scoped_to_store() {
        let pool = test_pool().await;
        let ws = seed_workspace(&pool, 100, 10, 5).await;
        let store_a = seed_store(&pool, ws).await;
        let store_b = seed_store(&pool, ws).await;
        let product = seed_product(&pool, store_a, "Mug", 1_200, 3, true).await;

        assert!(find_in_store(&pool, product, store_b).await.unwrap().is_none());
        assert!(!decrement_stock(&pool, product, store_b, 1, 10).await.unwrap());
        assert_eq!(count_in_store(&pool, store_a).await.unwrap(), 1);
        assert_eq!(count_in_store(&pool, store_b).await.unwrap(), 0);
    }
}
