//! 商品数据模型

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::object_id::ObjectId;

/// 商品
///
/// `id` 由仓储在创建时分配；创建请求中携带的 `id` 会被忽略。
/// `category` 在报文中必须出现，空字符串表示“未分类”。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[serde(default)]
    pub id: String,

    #[validate(custom(function = "validate_name"))]
    pub name: String,

    pub category: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image_file: String,

    #[validate(range(min = 0.0, message = "价格不能为负数"))]
    pub price: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            category: category.into(),
            summary: String::new(),
            description: String::new(),
            image_file: String::new(),
            price,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image_file(mut self, image_file: impl Into<String>) -> Self {
        self.image_file = image_file.into();
        self
    }

    /// 拆分为持久化文档，丢弃 `id`
    pub fn into_document(self) -> ProductDocument {
        ProductDocument {
            name: self.name,
            category: self.category,
            summary: self.summary,
            description: self.description,
            image_file: self.image_file,
            price: self.price,
        }
    }

    pub fn from_document(id: ObjectId, doc: ProductDocument) -> Self {
        Self {
            id: id.to_string(),
            name: doc.name,
            category: doc.category,
            summary: doc.summary,
            description: doc.description,
            image_file: doc.image_file,
            price: doc.price,
        }
    }
}

/// 持久化形式：除标识符外的全部字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_file: String,
    pub price: f64,
}

pub const NAME_MAX_CHARS: usize = 255;

/// 名称去除首尾空白后须为 1 到 255 个字符
fn validate_name(value: &str) -> Result<(), ValidationError> {
    let chars = value.trim().chars().count();
    if chars == 0 {
        let mut err = ValidationError::new("blank");
        err.message = Some("名称不能为空白".into());
        return Err(err);
    }
    if chars > NAME_MAX_CHARS {
        let mut err = ValidationError::new("length");
        err.message = Some("名称长度必须在 1 到 255 之间".into());
        return Err(err);
    }
    Ok(())
}
