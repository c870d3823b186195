//! 商品资源：模型、存储与处理器

pub mod handler;
pub mod model;
pub mod store;
