//! backoffice-server: order lifecycle and analytics for multi-tenant commerce
//!
//! # Modules
//!
//! - [`orders`]: atomic order creation, status updates, delete, stats
//! - [`analytics`]: dashboard, revenue series, rankings, breakdowns
//! - [`quota`]: plan ceilings
//! - [`catalog`]: store and product provisioning
//! - [`api`]: axum routes, [`auth`]: workspace JWT middleware
//! - [`db`]: SQLite pool, migrations and repositories

pub mod analytics;
pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod orders;
pub mod quota;
pub mod state;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use state::AppState;
