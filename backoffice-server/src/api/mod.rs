//! API routes
//!
//! - [`health`]: liveness, public
//! - [`orders`]: order lifecycle
//! - [`stores`]: store and product provisioning
//! - [`analytics`]: read-only reports
//!
//! Everything under `/api` requires a workspace JWT.

pub mod analytics;
pub mod health;
pub mod orders;
pub mod stores;

use axum::{Json, Router, middleware};
use http::{HeaderName, HeaderValue};
use serde::Deserialize;
use shared::error::AppError;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::workspace_auth_middleware;
use crate::state::AppState;

pub type ApiResult<T> = Result<Json<T>, AppError>;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Optional store narrowing shared by several endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreQuery {
    pub store_id: Option<i64>,
}

/// uuid v4 request IDs
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes with workspace auth applied under `/api`; state is supplied by the caller
pub fn build_router(state: &AppState) -> Router<AppState> {
    let authenticated = Router::new()
        .merge(orders::router())
        .merge(stores::router())
        .merge(analytics::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            workspace_auth_middleware,
        ));

    Router::new().merge(health::router()).merge(authenticated)
}

/// Fully configured application, used by the HTTP server and by oneshot tests
pub fn build_app(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    build_router(&state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
        .with_state(state)
}
