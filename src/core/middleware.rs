//! 核心中间件模块

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// 请求日志中间件
///
/// 沿用调用方传入的 `x-request-id`，没有则生成一个，并回写到响应头。
/// 5xx 响应以 warn 级别记录。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = user_agent(req.headers());
    let request_id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .cloned()
        .unwrap_or_else(|| {
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
        });

    let mut response = next.run(req).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis();
    let id = request_id.to_str().unwrap_or("-").to_string();

    if status.is_server_error() {
        warn!(
            request_id = %id,
            "{} {} - {} - {}ms - User-Agent: {:?}",
            method, uri, status, elapsed_ms, user_agent
        );
    } else {
        info!(
            request_id = %id,
            "{} {} - {} - {}ms - User-Agent: {:?}",
            method, uri, status, elapsed_ms, user_agent
        );
    }

    response.headers_mut().insert(REQUEST_ID_HEADER, request_id);
    response
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}
