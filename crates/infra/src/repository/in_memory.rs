//! In-memory repository for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use merx_catalog::CatalogProduct;
use merx_core::{CatalogError, CatalogId, CatalogResult, ProductId};

use super::ProductRepository;

/// RwLock<HashMap> product store. Clones on the way in and out, so callers
/// can't alias stored state.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<ProductId, CatalogProduct>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_by_ids(&self, ids: &[ProductId]) -> CatalogResult<Vec<CatalogProduct>> {
        let map = self
            .products
            .read()
            .map_err(|_| CatalogError::storage("product store poisoned"))?;
        Ok(ids.iter().filter_map(|id| map.get(id).cloned()).collect())
    }

    async fn upsert(&self, products: &[CatalogProduct]) -> CatalogResult<()> {
        let mut map = self
            .products
            .write()
            .map_err(|_| CatalogError::storage("product store poisoned"))?;
        for product in products {
            map.insert(product.id, product.clone());
        }
        Ok(())
    }

    async fn delete(&self, ids: &[ProductId]) -> CatalogResult<()> {
        let mut map = self
            .products
            .write()
            .map_err(|_| CatalogError::storage("product store poisoned"))?;
        for id in ids {
            map.remove(id);
        }
        Ok(())
    }

    async fn exists_code(
        &self,
        catalog_id: CatalogId,
        code: &str,
        except: Option<ProductId>,
    ) -> CatalogResult<bool> {
        let map = self
            .products
            .read()
            .map_err(|_| CatalogError::storage("product store poisoned"))?;
        Ok(map.values().any(|p| {
            p.catalog_id == catalog_id && p.code == code && Some(p.id) != except
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(catalog_id: CatalogId, code: &str) -> CatalogProduct {
        CatalogProduct::new(catalog_id, code, "Widget")
    }

    #[tokio::test]
    async fn upsert_then_get_round_trips() {
        let repo = InMemoryProductRepository::new();
        let catalog_id = CatalogId::new();
        let p = product(catalog_id, "SKU-1");
        let id = p.id;

        repo.upsert(&[p.clone()]).await.unwrap();
        let loaded = repo.get_by_ids(&[id]).await.unwrap();
        assert_eq!(loaded, vec![p]);
    }

    #[tokio::test]
    async fn unknown_ids_are_skipped() {
        let repo = InMemoryProductRepository::new();
        let loaded = repo.get_by_ids(&[ProductId::new()]).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn exists_code_is_catalog_scoped_and_honors_except() {
        let repo = InMemoryProductRepository::new();
        let catalog_a = CatalogId::new();
        let catalog_b = CatalogId::new();
        let p = product(catalog_a, "SKU-1");
        repo.upsert(&[p.clone()]).await.unwrap();

        assert!(repo.exists_code(catalog_a, "SKU-1", None).await.unwrap());
        assert!(!repo.exists_code(catalog_b, "SKU-1", None).await.unwrap());
        // The product itself doesn't conflict with its own code.
        assert!(!repo.exists_code(catalog_a, "SKU-1", Some(p.id)).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_products() {
        let repo = InMemoryProductRepository::new();
        let p = product(CatalogId::new(), "SKU-1");
        let id = p.id;
        repo.upsert(&[p]).await.unwrap();
        repo.delete(&[id]).await.unwrap();
        assert!(repo.get_by_ids(&[id]).await.unwrap().is_empty());
        assert!(repo.is_empty());
    }
}
