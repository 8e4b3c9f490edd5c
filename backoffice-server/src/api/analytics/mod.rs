//! Analytics API Module (read-only reports)

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/analytics", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handler::dashboard))
        .route("/revenue", get(handler::revenue))
        .route("/top-products", get(handler::top_products))
        .route("/top-customers", get(handler::top_customers))
        .route("/orders-by-status", get(handler::orders_by_status))
        .route("/sales-by-store", get(handler::sales_by_store))
        .route("/recent-orders", get(handler::recent_orders))
}
