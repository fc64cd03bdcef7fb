//! 内存仓储实现
//!
//! 不依赖外部数据库，用于测试和本地运行。克隆出的实例共享同一份数据。

use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{validate_product, ProductRepository, RepositoryResult};
use crate::app::catalog::model::{Product, ProductDocument};
use crate::core::object_id::ObjectId;

#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ObjectId, ProductDocument>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .map(|(id, doc)| Product::from_document(*id, doc.clone()))
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> RepositoryResult<Option<Product>> {
        let Some(object_id) = ObjectId::parse(id) else {
            debug!("非法商品 id: {}", id);
            return Ok(None);
        };

        let products = self.products.read().await;
        Ok(products
            .get(&object_id)
            .map(|doc| Product::from_document(object_id, doc.clone())))
    }

    async fn get_by_category(&self, category: &str) -> RepositoryResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|(_, doc)| doc.category == category)
            .map(|(id, doc)| Product::from_document(*id, doc.clone()))
            .collect())
    }

    async fn create(&self, product: Product) -> RepositoryResult<Product> {
        validate_product(&product)?;

        let id = ObjectId::new();
        let doc = product.into_document();
        self.products.write().await.insert(id, doc.clone());

        info!("创建商品: {} ({})", doc.name, id);
        Ok(Product::from_document(id, doc))
    }

    async fn update(&self, product: Product) -> RepositoryResult<bool> {
        validate_product(&product)?;

        let Some(object_id) = ObjectId::parse(&product.id) else {
            return Ok(false);
        };

        let mut products = self.products.write().await;
        match products.get_mut(&object_id) {
            Some(stored) => {
                *stored = product.into_document();
                info!("更新商品: {}", object_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let Some(object_id) = ObjectId::parse(id) else {
            return Ok(false);
        };

        let removed = self.products.write().await.remove(&object_id).is_some();
        if removed {
            info!("删除商品: {}", object_id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::catalog::repository::RepositoryError;
    use std::collections::HashSet;

    fn widget() -> Product {
        Product::new("Widget", "tools", 9.99)
            .with_summary("small")
            .with_description("a small widget")
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(widget()).await.unwrap();

        assert!(ObjectId::is_valid(&created.id));
        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(Product { id: String::new(), ..fetched }, widget());
    }

    #[tokio::test]
    async fn test_create_ignores_client_id() {
        let repo = InMemoryProductRepository::new();
        let client_id = "602d2149e773f2a3990b47f5".to_string();
        let created = repo
            .create(Product {
                id: client_id.clone(),
                ..widget()
            })
            .await
            .unwrap();

        assert_ne!(created.id, client_id);
        assert!(repo.get_by_id(&client_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_product() {
        let repo = InMemoryProductRepository::new();
        let err = repo.create(Product::new("", "tools", 1.0)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidInput(_)));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_unknown_or_malformed_id_is_absent() {
        let repo = InMemoryProductRepository::new();
        repo.create(widget()).await.unwrap();

        for id in [
            "602d2149e773f2a3990b47f5",
            "",
            "short",
            "zzzzzzzzzzzzzzzzzzzzzzzz",
            "602d2149e773f2a3990b47f5-extra",
        ] {
            assert!(repo.get_by_id(id).await.unwrap().is_none(), "id {:?}", id);
        }
    }

    #[tokio::test]
    async fn test_get_accepts_uppercase_id() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(widget()).await.unwrap();

        let fetched = repo.get_by_id(&created.id.to_uppercase()).await.unwrap();
        assert_eq!(fetched.map(|p| p.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_get_by_category_exact_match() {
        let repo = InMemoryProductRepository::new();
        let a = repo.create(Product::new("Hammer", "tools", 12.0)).await.unwrap();
        let b = repo.create(Product::new("Wrench", "tools", 8.5)).await.unwrap();
        repo.create(Product::new("Lamp", "Tools", 20.0)).await.unwrap();
        repo.create(Product::new("Chair", "furniture", 45.0)).await.unwrap();
        repo.create(Product::new("Misc", "", 1.0)).await.unwrap();

        let ids: HashSet<String> = repo
            .get_by_category("tools")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, HashSet::from([a.id, b.id]));

        assert_eq!(repo.get_by_category("").await.unwrap().len(), 1);
        assert!(repo.get_by_category("nonexistent").await.unwrap().is_empty());
        assert!(repo.get_by_category("tool").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_preserves_identity() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(widget()).await.unwrap();

        let replacement = Product {
            id: created.id.clone(),
            ..Product::new("Widget Pro", "premium-tools", 19.99)
        };
        assert!(repo.update(replacement.clone()).await.unwrap());

        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, replacement);
        // 整体替换：未提供的文本字段被清空
        assert_eq!(fetched.summary, "");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_missing_record_is_noop() {
        let repo = InMemoryProductRepository::new();
        let existing = repo.create(widget()).await.unwrap();

        let missing = Product {
            id: "602d2149e773f2a3990b47f5".into(),
            ..widget()
        };
        assert!(!repo.update(missing).await.unwrap());

        let malformed = Product {
            id: "not-an-id".into(),
            ..widget()
        };
        assert!(!repo.update(malformed).await.unwrap());

        assert_eq!(repo.get_by_id(&existing.id).await.unwrap(), Some(existing));
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(widget()).await.unwrap();

        let err = repo
            .update(Product {
                id: created.id.clone(),
                ..Product::new("Widget", "tools", -5.0)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidInput(_)));
        assert_eq!(repo.get_by_id(&created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryProductRepository::new();
        let target = repo.create(widget()).await.unwrap();
        let other = repo.create(Product::new("Gadget", "tools", 3.0)).await.unwrap();

        assert!(repo.delete(&target.id).await.unwrap());
        assert!(!repo.delete(&target.id).await.unwrap());
        assert!(!repo.delete("garbage").await.unwrap());

        assert!(repo.get_by_id(&target.id).await.unwrap().is_none());
        assert_eq!(repo.get_by_id(&other.id).await.unwrap(), Some(other));
    }

    #[tokio::test]
    async fn test_list_all() {
        let repo = InMemoryProductRepository::new();
        assert!(repo.list_all().await.unwrap().is_empty());

        let mut expected = HashSet::new();
        for i in 0..5 {
            let p = repo
                .create(Product::new(format!("Item {}", i), "bulk", i as f64))
                .await
                .unwrap();
            expected.insert(p.id);
        }

        let ids: HashSet<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryProductRepository::new();
        let clone = repo.clone();
        let created = clone.create(widget()).await.unwrap();
        assert!(repo.get_by_id(&created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let repo = InMemoryProductRepository::new();

        let created = repo
            .create(Product::new("Widget", "tools", 9.99))
            .await
            .unwrap();
        assert_eq!(created.id.len(), 24);
        assert_eq!(created.category, "tools");

        let tools = repo.get_by_category("tools").await.unwrap();
        assert!(tools.iter().any(|p| p.id == created.id));
        assert!(repo.get_by_category("nonexistent").await.unwrap().is_empty());

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(repo.get_by_id(&created.id).await.unwrap().is_none());
    }
}
