use crate::db::repository::RepoError;
use crate::quota::QuotaExceeded;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Order lifecycle errors
///
/// Every variant is raised before or inside the creation transaction, so
/// returning one leaves no partial writes behind.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Store not found: {0}")]
    StoreNotFound(i64),

    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Order not found: {0}")]
    OrderNotFound(i64),

    #[error("Workspace has no plan: {0}")]
    PlanNotFound(i64),

    #[error(transparent)]
    QuotaExceeded(#[from] QuotaExceeded),

    #[error("Insufficient stock for {product_name}: {available} available, {requested} requested")]
    InsufficientStock {
        product_name: String,
        available: i64,
        requested: i64,
    },

    #[error("Validation failed: {0}")]
    Validation(AppError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::Repo(err.into())
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::StoreNotFound(_) => AppError::new(ErrorCode::StoreNotFound),
            OrderError::ProductNotFound(id) => {
                AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", id)
            }
            OrderError::OrderNotFound(_) => AppError::new(ErrorCode::OrderNotFound),
            OrderError::PlanNotFound(workspace_id) => {
                tracing::warn!(workspace_id, "Workspace has no plan");
                AppError::new(ErrorCode::PlanNotFound)
            }
            OrderError::QuotaExceeded(q) => q.into(),
            OrderError::InsufficientStock {
                product_name,
                available,
                requested,
            } => AppError::insufficient_stock(product_name, available, requested),
            OrderError::Validation(e) => e,
            OrderError::Repo(e) => e.into(),
        }
    }
}

pub type OrderResult<T> = Result<T, OrderError>;
