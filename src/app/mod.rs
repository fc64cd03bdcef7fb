//! 应用层

use axum::{middleware, response::Json, routing::get, Router};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::core::middleware::request_logging_middleware;

pub mod catalog;

use catalog::{handler, AppState};

/// 组装完整路由：商品目录 + 健康检查 + 中间件
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(handler::routes())
        .route("/health", get(health_check))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "catalog",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
