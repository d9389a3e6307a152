use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all CRS endpoints.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/rest/store", post(handler::store_handler))
        .route("/rest/get", post(handler::get_handler))
        .route("/rest/delete", post(handler::delete_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
}
