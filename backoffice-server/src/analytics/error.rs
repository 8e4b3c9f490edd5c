use crate::db::repository::RepoError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Store not found: {0}")]
    StoreNotFound(i64),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<sqlx::Error> for AnalyticsError {
    fn from(err: sqlx::Error) -> Self {
        AnalyticsError::Repo(err.into())
    }
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::StoreNotFound(_) => AppError::new(ErrorCode::StoreNotFound),
            AnalyticsError::InvalidRange(msg) => {
                AppError::with_message(ErrorCode::InvalidDateRange, msg)
            }
            AnalyticsError::Repo(e) => e.into(),
        }
    }
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
