//! 商品数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// 存储中的商品记录
///
/// `id` 与 `created_at` 由存储在创建时分配，之后不再改变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

/// 局部更新：`None` 表示该字段未提供，保持原值
///
/// `description` 可以被显式置空，因此是两层 `Option`：
/// `Some(None)` 清空描述，`Some(Some(..))` 覆盖描述。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price.is_none()
    }

    /// 把已提供的字段写入商品
    pub(crate) fn apply_to(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
    }
}

// 创建商品请求
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

// 更新商品请求
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
}

impl From<UpdateItemRequest> for ItemPatch {
    fn from(req: UpdateItemRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
        }
    }
}

/// 删除成功的确认消息
#[derive(Debug, Serialize)]
pub struct DeleteItemResponse {
    pub message: String,
}

impl DeleteItemResponse {
    pub fn for_item(item: &Item) -> Self {
        Self {
            message: format!("Item '{}' deleted successfully", item.name),
        }
    }
}

/// 字段只要出现在请求体里（包括 `null`）就记为 `Some`
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
