//! Catalog/category resolution seams used by the enrichment pipeline.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use merx_catalog::{Catalog, Category};
use merx_core::{CatalogError, CatalogId, CatalogResult, CategoryId};

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn get(&self, id: CatalogId) -> CatalogResult<Option<Catalog>>;
}

#[async_trait]
pub trait CategorySource: Send + Sync {
    async fn get(&self, id: CategoryId) -> CatalogResult<Option<Category>>;

    /// Ancestor chain root-first, ending with the requested category.
    ///
    /// Implementations must fail with `InvariantViolation` rather than loop
    /// when stored parent pointers form a cycle.
    async fn ancestors(&self, id: CategoryId) -> CatalogResult<Vec<Category>>;
}

/// RwLock<HashMap> catalog source for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCatalogSource {
    catalogs: RwLock<HashMap<CatalogId, Catalog>>,
}

impl InMemoryCatalogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, catalog: Catalog) {
        if let Ok(mut map) = self.catalogs.write() {
            map.insert(catalog.id, catalog);
        }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn get(&self, id: CatalogId) -> CatalogResult<Option<Catalog>> {
        let map = self
            .catalogs
            .read()
            .map_err(|_| CatalogError::storage("catalog source poisoned"))?;
        Ok(map.get(&id).cloned())
    }
}

/// RwLock<HashMap> category source for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCategorySource {
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl InMemoryCategorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, category: Category) {
        if let Ok(mut map) = self.categories.write() {
            map.insert(category.id, category);
        }
    }
}

#[async_trait]
impl CategorySource for InMemoryCategorySource {
    async fn get(&self, id: CategoryId) -> CatalogResult<Option<Category>> {
        let map = self
            .categories
            .read()
            .map_err(|_| CatalogError::storage("category source poisoned"))?;
        Ok(map.get(&id).cloned())
    }

    async fn ancestors(&self, id: CategoryId) -> CatalogResult<Vec<Category>> {
        let map = self
            .categories
            .read()
            .map_err(|_| CatalogError::storage("category source poisoned"))?;

        let mut chain = Vec::new();
        let mut seen = std::collections::HashSet::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if !seen.insert(current) {
                return Err(CatalogError::invariant(format!(
                    "cyclic category chain at {current}"
                )));
            }
            let category = map.get(&current).ok_or(CatalogError::NotFound)?;
            cursor = category.parent_id;
            chain.push(category.clone());
        }
        chain.reverse();
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ancestors_come_back_root_first() {
        let source = InMemoryCategorySource::new();
        let catalog_id = CatalogId::new();
        let root = Category::new(CategoryId::new(), catalog_id, "Tools");
        let mid = Category::new(CategoryId::new(), catalog_id, "Power Tools").with_parent(root.id);
        let leaf = Category::new(CategoryId::new(), catalog_id, "Drills").with_parent(mid.id);
        source.insert(root.clone());
        source.insert(mid.clone());
        source.insert(leaf.clone());

        let chain = source.ancestors(leaf.id).await.unwrap();
        let ids: Vec<CategoryId> = chain.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![root.id, mid.id, leaf.id]);
    }

    #[tokio::test]
    async fn cyclic_parent_pointers_error_instead_of_looping() {
        let source = InMemoryCategorySource::new();
        let catalog_id = CatalogId::new();
        let a_id = CategoryId::new();
        let b_id = CategoryId::new();
        let a = Category::new(a_id, catalog_id, "A").with_parent(b_id);
        let b = Category::new(b_id, catalog_id, "B").with_parent(a_id);
        source.insert(a);
        source.insert(b);

        let err = source.ancestors(a_id).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvariantViolation(_)));
    }

    #[tokio::test]
    async fn missing_ancestor_is_not_found() {
        let source = InMemoryCategorySource::new();
        let catalog_id = CatalogId::new();
        let orphan =
            Category::new(CategoryId::new(), catalog_id, "Orphan").with_parent(CategoryId::new());
        source.insert(orphan.clone());

        let err = source.ancestors(orphan.id).await.unwrap_err();
        assert_eq!(err, CatalogError::NotFound);
    }
}
