//! 商品处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::info;
use validator::Validate;

use super::model::{CreateItemRequest, DeleteItemResponse, Item, UpdateItemRequest};
use crate::app::AppState;
use crate::core::error::CoreError;

/// 解析路径中的商品 id
///
/// 任何整数都是合法的 id；存储分配不到的值（负数、超出 u64）按不存在处理，
/// 非整数才算请求错误。
pub(crate) fn parse_item_id(raw: &str) -> Result<u64, CoreError> {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::BadRequest(format!("invalid item id: {}", raw)));
    }

    raw.strip_prefix('+')
        .unwrap_or(raw)
        .parse::<u64>()
        .map_err(|_| CoreError::NotFound("Item not found".to_string()))
}

pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.item_store.list())
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, CoreError> {
    let item = state.item_store.get(parse_item_id(&id)?)?;
    Ok(Json(item))
}

pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), CoreError> {
    payload.validate()?;

    let item = state
        .item_store
        .create(payload.name, payload.description, payload.price);
    info!("创建商品: id={}, name={}", item.id, item.name);

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<Item>, CoreError> {
    let id = parse_item_id(&id)?;
    payload.validate()?;

    let item = state.item_store.update(id, payload.into())?;
    info!("更新商品: id={}", item.id);

    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteItemResponse>, CoreError> {
    let item = state.item_store.delete(parse_item_id(&id)?)?;
    info!("删除商品: id={}, name={}", item.id, item.name);

    Ok(Json(DeleteItemResponse::for_item(&item)))
}
