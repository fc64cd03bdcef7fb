//! PostgreSQL 文档存储实现
//!
//! 每个商品存为 `products` 表中的一行：`id` 为 24 位标识符，`doc` 为 JSONB 文档。
//! 分类查询走 `doc->>'category'` 表达式索引，比较区分大小写。

use async_trait::async_trait;
use sqlx::{postgres::PgPool, types::Json};
use tracing::{debug, info};

use super::{validate_product, ProductRepository, RepositoryError, RepositoryResult};
use crate::app::catalog::model::{Product, ProductDocument};
use crate::core::object_id::ObjectId;

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 将一行数据还原为商品，id 或文档不合法时视为数据损坏
fn decode_row((id, doc): (String, serde_json::Value)) -> RepositoryResult<Product> {
    let object_id = ObjectId::parse(&id).ok_or_else(|| RepositoryError::Corrupted {
        id: id.clone(),
        message: "标识符格式错误".to_string(),
    })?;

    let doc: ProductDocument =
        serde_json::from_value(doc).map_err(|e| RepositoryError::Corrupted {
            id: id.clone(),
            message: e.to_string(),
        })?;

    Ok(Product::from_document(object_id, doc))
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, (String, serde_json::Value)>("SELECT id, doc FROM products")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(decode_row).collect()
    }

    async fn get_by_id(&self, id: &str) -> RepositoryResult<Option<Product>> {
        let Some(object_id) = ObjectId::parse(id) else {
            debug!("非法商品 id: {}", id);
            return Ok(None);
        };

        let row = sqlx::query_as::<_, (String, serde_json::Value)>(
            "SELECT id, doc FROM products WHERE id = $1",
        )
        .bind(object_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(decode_row).transpose()
    }

    async fn get_by_category(&self, category: &str) -> RepositoryResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, (String, serde_json::Value)>(
            "SELECT id, doc FROM products WHERE doc->>'category' = $1",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        debug!("分类 {:?} 命中 {} 条", category, rows.len());
        rows.into_iter().map(decode_row).collect()
    }

    async fn create(&self, product: Product) -> RepositoryResult<Product> {
        validate_product(&product)?;

        let id = ObjectId::new();
        let doc = product.into_document();

        sqlx::query("INSERT INTO products (id, doc) VALUES ($1, $2)")
            .bind(id.to_string())
            .bind(Json(&doc))
            .execute(&self.pool)
            .await?;

        info!("创建商品: {} ({})", doc.name, id);
        Ok(Product::from_document(id, doc))
    }

    async fn update(&self, product: Product) -> RepositoryResult<bool> {
        validate_product(&product)?;

        let Some(object_id) = ObjectId::parse(&product.id) else {
            return Ok(false);
        };

        let result = sqlx::query("UPDATE products SET doc = $2 WHERE id = $1")
            .bind(object_id.to_string())
            .bind(Json(product.into_document()))
            .execute(&self.pool)
            .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!("更新商品: {}", object_id);
        }
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let Some(object_id) = ObjectId::parse(id) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(object_id.to_string())
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("删除商品: {}", object_id);
        }
        Ok(deleted)
    }
}
