//! 商品仓储
//!
//! 仓储是读写商品数据的唯一入口。“查无此记录”属于正常结果：
//! - 按 id 读取不到返回 `Ok(None)`
//! - 更新/删除不存在的记录返回 `Ok(false)`
//!
//! 只有存储层故障和非法输入才会以 `Err` 返回。

use async_trait::async_trait;
use validator::Validate;

use super::model::Product;

pub mod memory;
#[cfg(feature = "database")]
pub mod postgres;

pub use memory::InMemoryProductRepository;
#[cfg(feature = "database")]
pub use postgres::PgProductRepository;

/// 仓储错误
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// 商品字段不合法，未访问存储
    #[error("输入无效: {0}")]
    InvalidInput(String),
    /// 存储不可达、超时或查询失败
    #[error("存储错误: {0}")]
    Storage(String),
    /// 已存储的文档无法解码
    #[error("数据损坏 (id={id}): {message}")]
    Corrupted { id: String, message: String },
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        RepositoryError::Storage(err.to_string())
    }
}

impl From<validator::ValidationErrors> for RepositoryError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let msg = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    format!("{}: {}", field, msg)
                })
            })
            .collect();
        messages.sort();

        RepositoryError::InvalidInput(messages.join(", "))
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// 商品仓储接口
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 全部商品，顺序不保证
    async fn list_all(&self) -> RepositoryResult<Vec<Product>>;

    /// 按 id 读取；格式非法的 id 与不存在的 id 一样返回 `None`
    async fn get_by_id(&self, id: &str) -> RepositoryResult<Option<Product>>;

    /// 按分类精确匹配（区分大小写），无匹配时返回空集合
    async fn get_by_category(&self, category: &str) -> RepositoryResult<Vec<Product>>;

    /// 创建商品，忽略传入的 `id` 并返回带新 id 的记录
    async fn create(&self, product: Product) -> RepositoryResult<Product>;

    /// 整体替换 `product.id` 对应的记录，记录不存在时返回 `false`
    async fn update(&self, product: Product) -> RepositoryResult<bool>;

    /// 删除记录，记录不存在时返回 `false`
    async fn delete(&self, id: &str) -> RepositoryResult<bool>;
}

/// 写入前的字段校验
pub fn validate_product(product: &Product) -> RepositoryResult<()> {
    product.validate()?;
    if !product.price.is_finite() {
        return Err(RepositoryError::InvalidInput(
            "price: 价格必须是有限数值".to_string(),
        ));
    }
    Ok(())
}
