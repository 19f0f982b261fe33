//! 应用层

pub mod product;

use axum::{middleware, routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::core::middleware::request_logging_middleware;
pub use product::handler::AppState;

/// 创建路由
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    use product::handler::*;

    Router::new()
        .route("/select", get(select_products))
        .route("/insert", get(insert_product))
        .route("/update", get(update_product))
        .route("/delete", get(delete_product))
        .route("/deleteAll", get(delete_all_products))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}
