//! 系统端点：欢迎页、健康检查、接口说明

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::app::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to Item API" }))
}

/// 健康检查
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "storage": {
            "type": "in-memory",
            "items": state.item_store.len()
        }
    }))
}

/// API 信息
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "name": "Item API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "A simple item service with CRUD operations",
        "endpoints": {
            "GET /items": "List all items",
            "POST /items": "Create a new item",
            "GET /items/:id": "Get a specific item by id",
            "PUT /items/:id": "Update an existing item",
            "DELETE /items/:id": "Delete an item"
        },
        "examples": {
            "create_item": {
                "method": "POST",
                "url": "/items",
                "body": { "name": "Laptop", "description": "14 inch", "price": 1499.99 }
            },
            "update_item": {
                "method": "PUT",
                "url": "/items/:id",
                "body": { "price": 1299.99 }
            }
        }
    }))
}
