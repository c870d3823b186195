//! 核心中间件模块

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

use super::error::ErrorResponse;

/// 请求 id 响应头
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// 请求日志中间件
///
/// 为每个请求分配 id，写入日志、`x-request-id` 响应头和错误响应体。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let mut response = next.run(req).await;
    stamp_request_id(&mut response, &request_id);

    info!(
        "[{}] {} {} - {} - {}ms - User-Agent: {:?}",
        request_id,
        method,
        uri,
        response.status(),
        start.elapsed().as_millis(),
        user_agent
    );

    response
}

fn stamp_request_id(response: &mut Response, request_id: &str) {
    // CoreError 渲染时把错误体放进扩展，这里补上 id 后重写响应体
    if let Some(mut error) = response.extensions_mut().remove::<ErrorResponse>() {
        error.request_id = request_id.to_string();
        if let Ok(body) = serde_json::to_vec(&error) {
            *response.body_mut() = Body::from(body);
        }
    }

    if let Ok(value) = HeaderValue::from_str(request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }
}
