//! # Item API
//!
//! 基于 Axum 的商品增删改查服务，数据保存在进程内存中，重启即清空。
//!
//! 分层结构：
//! - `app`: 路由、处理器、商品模型与存储
//! - `core`: 统一错误处理、请求日志中间件
//! - `infrastructure`: 配置加载、日志初始化

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::items::model::{Item, ItemPatch};
pub use app::items::store::{ItemError, ItemStore};
pub use app::{build_router, AppState};
