//! 应用层：路由与各资源处理器

pub mod items;
pub mod system;

use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::core::middleware::request_logging_middleware;
use crate::infrastructure::config::HttpConfig;
use items::{handler as item_handler, store::ItemStore};
use system::handler as system_handler;

/// 路由共享状态
#[derive(Clone, Default)]
pub struct AppState {
    pub item_store: ItemStore,
}

impl AppState {
    pub fn new(item_store: ItemStore) -> Self {
        Self { item_store }
    }
}

/// 构建完整路由（含中间件）
pub fn build_router(state: AppState, http: &HttpConfig) -> Router {
    Router::new()
        .route("/", get(system_handler::root))
        .route("/health", get(system_handler::health_check))
        .route("/info", get(system_handler::api_info))
        .route(
            "/items",
            get(item_handler::list_items).post(item_handler::create_item),
        )
        .route(
            "/items/:id",
            get(item_handler::get_item)
                .put(item_handler::update_item)
                .delete(item_handler::delete_item),
        )
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(http.timeout_seconds)))
        .with_state(state)
}
