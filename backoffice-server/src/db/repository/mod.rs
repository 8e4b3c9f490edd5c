//! Repository Module
//!
//! Free functions over `sqlx` executors. Functions that may run inside the
//! order-creation transaction are generic over [`sqlx::SqliteExecutor`] so
//! the same SQL serves both the pool and `&mut *tx`.

pub mod analytics;
pub mod customer;
pub mod order;
pub mod order_sequence;
pub mod product;
pub mod store;
pub mod workspace;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// SQLite primary result codes that mean "another writer holds the lock"
const SQLITE_BUSY_CODES: &[&str] = &["5", "517", "6"];

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database busy: {0}")]
    Busy(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(db_err.message().to_string());
            }
            if db_err
                .code()
                .is_some_and(|c| SQLITE_BUSY_CODES.contains(&&*c))
            {
                return RepoError::Busy(db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Busy(msg) => {
                tracing::warn!(error = %msg, "Database busy");
                AppError::new(ErrorCode::SystemBusy)
            }
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
