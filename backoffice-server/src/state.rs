//! Application state for backoffice-server

use sqlx::SqlitePool;

use crate::analytics::Analytics;
use crate::config::Config;
use crate::db::DbService;
use crate::orders::OrderManager;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
///
/// Cheap to clone: everything inside is a pool handle or a shared string.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    pub orders: OrderManager,
    pub analytics: Analytics,
    /// JWT secret for workspace authentication
    pub jwt_secret: String,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let db = DbService::new(config).await?;
        Ok(Self::with_pool(db.pool, config.jwt_secret.clone()))
    }

    pub fn with_pool(pool: SqlitePool, jwt_secret: String) -> Self {
        Self {
            orders: OrderManager::new(pool.clone()),
            analytics: Analytics::new(pool.clone()),
            pool,
            jwt_secret,
        }
    }
}
